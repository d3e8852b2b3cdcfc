use std::fmt;

/// A parsed placeholder: generator name plus positional string arguments.
///
/// `"numberBetween:100:1000"` parses to name `numberBetween`, args `["100", "1000"]`.
/// Parsing never fails; whether the name means anything is up to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub args: Vec<String>,
}

impl Placeholder {
    /// Splits a string leaf on `:`
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(':');
        let name = parts.next().unwrap_or_default().to_string();
        let args = parts.map(str::to_string).collect();
        Self { name, args }
    }

    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    /// Argument `index`, if supplied
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, ":{arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        let p = Placeholder::parse("firstName");
        assert_eq!(p.name, "firstName");
        assert!(!p.has_args());
    }

    #[test]
    fn test_parse_with_args() {
        let p = Placeholder::parse("numberBetween:100:1000");
        assert_eq!(p.name, "numberBetween");
        assert_eq!(p.args, vec!["100", "1000"]);
        assert_eq!(p.arg(1), Some("1000"));
        assert_eq!(p.arg(2), None);
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        let p = Placeholder::parse("id:");
        assert_eq!(p.args, vec![""]);

        let p = Placeholder::parse("");
        assert_eq!(p.name, "");
        assert!(!p.has_args());
    }

    #[test]
    fn test_display_round_trips_text() {
        for raw in ["id", "id:7", "commandWithArgs:echo:hello:faker-word", "Hello: world"] {
            assert_eq!(Placeholder::parse(raw).to_string(), raw);
        }
    }
}
