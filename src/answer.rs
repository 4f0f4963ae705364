//! Answer normalization and matching.
//!
//! Normalization is an ordered list of pure string steps. Two answers are
//! equivalent when their normalized forms are equal; there is no LaTeX
//! reduction beyond these steps, so catalogs list every variant they accept
//! (`\gamma` and `gamma` are different answers unless both are listed).

/// One rewrite applied during normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizeStep {
    Trim,
    StripWhitespace,
    StripGrouping,
    HatToCaret,
    Lowercase,
}

/// Applied in order.
pub const NORMALIZE_STEPS: &[NormalizeStep] = &[
    NormalizeStep::Trim,
    NormalizeStep::StripWhitespace,
    NormalizeStep::StripGrouping,
    NormalizeStep::HatToCaret,
    NormalizeStep::Lowercase,
];

const GROUPING: [char; 4] = ['{', '}', '(', ')'];

impl NormalizeStep {
    pub fn apply(self, input: &str) -> String {
        match self {
            NormalizeStep::Trim => input.trim().to_string(),
            NormalizeStep::StripWhitespace => input.replace(char::is_whitespace, ""),
            NormalizeStep::StripGrouping => input.replace(GROUPING, ""),
            NormalizeStep::HatToCaret => input.replace("\\hat", "^"),
            NormalizeStep::Lowercase => input.to_lowercase(),
        }
    }
}

pub fn normalize(raw: &str) -> String {
    NORMALIZE_STEPS
        .iter()
        .fold(raw.to_string(), |acc, step| step.apply(&acc))
}

/// True when `raw` is equivalent to any accepted answer.
pub fn matches<S: AsRef<str>>(raw: &str, accepted: &[S]) -> bool {
    let norm = normalize(raw);
    accepted.iter().any(|a| normalize(a.as_ref()) == norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BELLMAN: [&str; 4] = ["\\gamma", "gamma", "Γ", "discount"];

    #[test]
    fn normalize_runs_steps_in_order() {
        assert_eq!(normalize("  \\log \\hat{y}_i "), "\\log^y_i");
        assert_eq!(normalize("\\sqrt{d_k}"), "\\sqrtd_k");
        assert_eq!(normalize("t*sin(t)"), "t*sint");
        assert_eq!(normalize("D_{KL}"), "d_kl");
    }

    #[test]
    fn normalize_keeps_backslashes_and_other_symbols() {
        assert_eq!(normalize("\\Frac{P}/Q^2"), "\\fracp/q^2");
        assert_eq!(normalize("a_b\\c"), "a_b\\c");
    }

    #[test]
    fn empty_input_is_fine() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
        assert!(!matches("", &BELLMAN));
        assert!(!matches("  ", &BELLMAN));
    }

    #[test]
    fn matches_ignores_case_whitespace_and_grouping() {
        assert!(matches(" Gamma ", &BELLMAN));
        assert!(matches("g a m m a", &BELLMAN));
        assert!(matches("{gamma}", &BELLMAN));
        assert!(matches("(DISCOUNT)", &BELLMAN));
        assert!(matches("γ", &BELLMAN));
    }

    #[test]
    fn capital_latex_gamma_only_matches_through_enumerated_variant() {
        assert_eq!(normalize("\\Gamma"), "\\gamma");
        assert!(matches("\\Gamma", &BELLMAN));
        assert!(!matches("\\Gamma", &["gamma"]));
        assert!(!matches("gamma", &["\\gamma"]));
    }

    #[test]
    fn hat_forms_are_equivalent() {
        let xent = ["\\log \\hat{y}_i", "\\log \\hat y_i", "log yhat_i"];
        assert!(matches("\\log\\hat{y}_i", &xent));
        assert!(matches("\\LOG \\hat Y_I", &xent));
        assert!(!matches("\\log \\HAT y_i", &xent));
        assert!(matches("\\log ^y_i", &xent));
        assert!(!matches("\\log y_i", &xent));
    }

    #[test]
    fn wrong_answers_do_not_match() {
        assert!(!matches("beta", &BELLMAN));
        assert!(!matches("\\gamma2", &BELLMAN));
        assert!(!matches("gam ma x", &BELLMAN));
    }
}
