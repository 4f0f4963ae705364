//! Math typesetting for prompts.
//!
//! egui has no TeX engine, so [`UnicodeMath`] lowers the TeX subset the
//! catalog uses (Greek letters, sub/superscripts, fractions, roots, hats,
//! `\text`, `\mathcal`, `\left`/`\right`) to Unicode text. Anything outside
//! that subset makes `render` return `None`, and [`display`] falls back to
//! the raw markup.

use crate::model::BLANK;

pub trait MathRenderer {
    fn render(&self, tex: &str) -> Option<String>;
}

/// TeX to Unicode text.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeMath;

/// Used when typesetting is switched off: never renders.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawMarkup;

impl MathRenderer for UnicodeMath {
    fn render(&self, tex: &str) -> Option<String> {
        Parser::new(tex).render_until(None)
    }
}

impl MathRenderer for RawMarkup {
    fn render(&self, _tex: &str) -> Option<String> {
        None
    }
}

pub fn renderer(typeset: bool) -> Box<dyn MathRenderer> {
    if typeset {
        Box::new(UnicodeMath)
    } else {
        Box::new(RawMarkup)
    }
}

/// Rendered text, or the markup unchanged when the renderer cannot handle it.
pub fn display(renderer: &dyn MathRenderer, tex: &str) -> String {
    match renderer.render(tex) {
        Some(text) => text,
        None => {
            log::debug!("showing raw markup for {tex:?}");
            tex.to_string()
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(tex: &str) -> Self {
        Self {
            chars: tex.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn at_blank(&self) -> bool {
        let blank: Vec<char> = BLANK.chars().collect();
        self.chars[self.pos..].starts_with(&blank)
    }

    /// Renders until `close` (consumed) or end of input.
    fn render_until(&mut self, close: Option<char>) -> Option<String> {
        let mut out = String::new();
        let mut pending_space = false;
        while let Some(c) = self.peek() {
            if Some(c) == close {
                self.pos += 1;
                return Some(out);
            }
            if c.is_whitespace() {
                self.pos += 1;
                pending_space = true;
                continue;
            }
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;

            if self.at_blank() {
                self.pos += BLANK.len();
                out.push_str(BLANK);
                continue;
            }

            self.pos += 1;
            match c {
                '\\' => {
                    let cmd = self.command()?;
                    if is_operator(&cmd) && out.ends_with(|c: char| c.is_alphanumeric()) {
                        out.push(' ');
                    }
                    out.push_str(&cmd);
                }
                '{' => out.push_str(&self.render_until(Some('}'))?),
                '}' => return None,
                '^' => {
                    let arg = self.argument()?;
                    out.push_str(&script(&arg, '^', superscript));
                }
                '_' => {
                    let arg = self.argument()?;
                    out.push_str(&script(&arg, '_', subscript));
                }
                '\'' => out.push('′'),
                other => out.push(other),
            }
        }
        // Unbalanced group.
        if close.is_some() { None } else { Some(out) }
    }

    /// One argument: a braced group, a command, or a single character.
    fn argument(&mut self) -> Option<String> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        match self.bump()? {
            '{' => self.render_until(Some('}')),
            '\\' => self.command(),
            '\'' => Some("′".to_string()),
            c => Some(c.to_string()),
        }
    }

    /// Raw text of a braced argument, for `\text` and friends.
    fn raw_argument(&mut self) -> Option<String> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        if self.bump()? != '{' {
            return None;
        }
        let mut depth = 1;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(out);
                    }
                }
                _ => {}
            }
            out.push(c);
        }
        None
    }

    fn command(&mut self) -> Option<String> {
        let first = self.bump()?;
        if !first.is_ascii_alphabetic() {
            return symbol_command(first).map(str::to_string);
        }
        let mut name = String::from(first);
        while let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(c);
            self.pos += 1;
        }

        match name.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.argument()?;
                let den = self.argument()?;
                Some(format!("{}/{}", wrap(&num), wrap(&den)))
            }
            "sqrt" => Some(format!("√{}", wrap(&self.argument()?))),
            "hat" => {
                let arg = self.argument()?;
                Some(format!("{arg}\u{0302}"))
            }
            "text" | "mathrm" | "operatorname" => self.raw_argument(),
            "mathcal" => Some(self.argument()?.chars().map(script_letter).collect()),
            "color" => {
                self.raw_argument()?;
                Some(String::new())
            }
            "left" | "right" => {
                let delim = self.bump()?;
                Some(match delim {
                    '.' => String::new(),
                    '\\' => self.command()?,
                    d => d.to_string(),
                })
            }
            other => word_command(other).map(str::to_string),
        }
    }
}

fn symbol_command(c: char) -> Option<&'static str> {
    Some(match c {
        ';' | ':' | ',' | ' ' => " ",
        '!' => "",
        '|' => "‖",
        '{' => "{",
        '}' => "}",
        '_' => "_",
        '%' => "%",
        _ => return None,
    })
}

fn word_command(name: &str) -> Option<&'static str> {
    Some(match name {
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" | "varepsilon" => "ε",
        "eta" => "η",
        "theta" => "θ",
        "lambda" => "λ",
        "mu" => "μ",
        "pi" => "π",
        "rho" => "ρ",
        "sigma" => "σ",
        "tau" => "τ",
        "phi" | "varphi" => "φ",
        "psi" => "ψ",
        "omega" => "ω",
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Phi" => "Φ",
        "Psi" => "Ψ",
        "Omega" => "Ω",
        "sum" => "Σ",
        "prod" => "∏",
        "int" => "∫",
        "max" => "max",
        "min" => "min",
        "arg" => "arg",
        "log" => "log",
        "ln" => "ln",
        "exp" => "exp",
        "sin" => "sin",
        "cos" => "cos",
        "tan" => "tan",
        "cdot" => "·",
        "times" => "×",
        "infty" => "∞",
        "partial" => "∂",
        "nabla" => "∇",
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "to" | "rightarrow" => "→",
        "in" => "∈",
        "mid" => "|",
        "quad" => "  ",
        "qquad" => "    ",
        _ => return None,
    })
}

/// Upright operator names, which need a space after a preceding symbol.
fn is_operator(word: &str) -> bool {
    matches!(
        word,
        "max" | "min" | "arg" | "log" | "ln" | "exp" | "sin" | "cos" | "tan"
    )
}

/// Parenthesizes multi-symbol operands of `/` and `√`.
fn wrap(arg: &str) -> String {
    if arg == BLANK || arg.chars().count() <= 1 || (arg.starts_with('(') && arg.ends_with(')')) {
        arg.to_string()
    } else {
        format!("({arg})")
    }
}

/// Maps every character through `map`, or falls back to `marker` + text.
/// Letter-only subscripts without a glyph try the small letters instead.
fn script(arg: &str, marker: char, map: fn(char) -> Option<char>) -> String {
    if let Some(s) = arg.chars().map(map).collect::<Option<String>>() {
        return s;
    }
    if marker == '_' && arg.chars().all(|c| c.is_ascii_alphabetic()) {
        let lowered = arg.chars().map(|c| map(c.to_ascii_lowercase()));
        if let Some(s) = lowered.collect::<Option<String>>() {
            return s;
        }
    }
    if arg.chars().count() == 1 {
        format!("{marker}{arg}")
    } else {
        format!("{marker}({arg})")
    }
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        'T' => 'ᵀ',
        '*' => '*',
        '′' => '′',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        'r' => 'ᵣ',
        's' => 'ₛ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        '′' => '′',
        _ => return None,
    })
}

/// Mathematical script capitals; lower case passes through.
fn script_letter(c: char) -> char {
    match c {
        'B' => 'ℬ',
        'E' => 'ℰ',
        'F' => 'ℱ',
        'H' => 'ℋ',
        'I' => 'ℐ',
        'L' => 'ℒ',
        'M' => 'ℳ',
        'R' => 'ℛ',
        'A'..='Z' => char::from_u32(0x1D49C + (c as u32 - 'A' as u32)).unwrap_or(c),
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tex: &str) -> Option<String> {
        UnicodeMath.render(tex)
    }

    #[test]
    fn renders_catalog_prompts() {
        assert_eq!(
            render(r"V^{*}(s)=\max_{a}\left[ R(s,a) + ___\sum_{s'} P(s'|s,a) V^{*}(s') \right]")
                .as_deref(),
            Some("V*(s)=maxₐ[ R(s,a) + ___Σₛ′ P(s′|s,a) V*(s′) ]")
        );
        assert_eq!(
            render(r"\mathcal{L} = - \sum_i y_i \; ___").as_deref(),
            Some("ℒ = - Σᵢ yᵢ   ___")
        );
        assert_eq!(
            render(r"D_{KL}(P\|Q) = \sum_x P(x) \; ___").as_deref(),
            Some("Dₖₗ(P‖Q) = Σₓ P(x)   ___")
        );
    }

    #[test]
    fn operator_words_keep_their_space() {
        assert_eq!(render(r"t\cos t").as_deref(), Some("t cos t"));
        assert_eq!(
            render(r"(x,y,z) = (t\cos t, \; y, \; ___)").as_deref(),
            Some("(x,y,z) = (t cos t,   y,   ___)")
        );
        assert_eq!(render(r"t\sin t").as_deref(), Some("t sin t"));
        assert_eq!(render(r"(\log x)").as_deref(), Some("(log x)"));
        assert_eq!(render(r"\max_{a}").as_deref(), Some("maxₐ"));
    }

    #[test]
    fn capital_subscripts_use_small_letters() {
        assert_eq!(render(r"D_{KL}").as_deref(), Some("Dₖₗ"));
        assert_eq!(render(r"x_{BQ}").as_deref(), Some("x_(BQ)"));
    }

    #[test]
    fn fractions_roots_and_hats() {
        assert_eq!(render(r"\frac{P(x)}{Q(x)}").as_deref(), Some("(P(x))/(Q(x))"));
        assert_eq!(render(r"\frac12").as_deref(), Some("1/2"));
        assert_eq!(render(r"\sqrt{d_k}").as_deref(), Some("√(dₖ)"));
        assert_eq!(render(r"\hat{y}_i").as_deref(), Some("y\u{0302}ᵢ"));
        assert_eq!(render(r"QK^T").as_deref(), Some("QKᵀ"));
    }

    #[test]
    fn text_and_spacing_commands() {
        assert_eq!(
            render(r"\text{softmax}\!\left( x \right)").as_deref(),
            Some("softmax( x )")
        );
        assert_eq!(render(r"\color{#6BEFA3}{x}").as_deref(), Some("x"));
    }

    #[test]
    fn blank_marker_survives_inside_groups() {
        assert_eq!(render(r"\dfrac{QK^T}{___}").as_deref(), Some("(QKᵀ)/___"));
    }

    #[test]
    fn unknown_commands_and_unbalanced_groups_fall_back() {
        assert_eq!(render(r"\unknown{x}"), None);
        assert_eq!(render(r"{x"), None);
        assert_eq!(render(r"x}"), None);
        assert_eq!(display(&UnicodeMath, r"\unknown"), r"\unknown");
    }

    #[test]
    fn raw_markup_renderer_always_falls_back() {
        let tex = r"\gamma + ___";
        assert_eq!(display(&RawMarkup, tex), tex);
        assert_eq!(display(renderer(true).as_ref(), tex), "γ + ___");
        assert_eq!(display(renderer(false).as_ref(), tex), tex);
    }
}
