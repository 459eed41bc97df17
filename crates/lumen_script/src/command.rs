//! Line tokenizer and argument helpers.

use std::str::FromStr;

use crate::error::{ScriptError, ScriptResult};

/// One non-empty, non-comment line split on whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Command<'a> {
    /// 1-based source line
    pub line: usize,
    pub keyword: &'a str,
    pub args: Vec<&'a str>,
}

/// Split a script into commands, skipping blank lines and `#` comments.
pub fn tokenize(source: &str) -> impl Iterator<Item = Command<'_>> {
    source.lines().enumerate().filter_map(|(i, text)| {
        let text = text.trim();
        if text.starts_with('#') {
            return None;
        }
        let mut tokens = text.split_whitespace();
        let keyword = tokens.next()?;
        Some(Command {
            line: i + 1,
            keyword,
            args: tokens.collect(),
        })
    })
}

impl<'a> Command<'a> {
    pub fn malformed(&self, message: impl Into<String>) -> ScriptError {
        ScriptError::Malformed {
            line: self.line,
            message: format!("{}: {}", self.keyword, message.into()),
        }
    }

    /// Require exactly `n` arguments.
    pub fn expect_args(&self, n: usize) -> ScriptResult<()> {
        if self.args.len() != n {
            return Err(self.malformed(format!(
                "expected {} arguments, got {}",
                n,
                self.args.len()
            )));
        }
        Ok(())
    }

    fn parse<T: FromStr>(&self, token: &str) -> ScriptResult<T> {
        token.parse().map_err(|_| ScriptError::InvalidNumber {
            line: self.line,
            token: token.to_string(),
        })
    }

    /// Parse argument `i`.
    pub fn arg<T: FromStr>(&self, i: usize) -> ScriptResult<T> {
        let token = self
            .args
            .get(i)
            .ok_or_else(|| self.malformed(format!("missing argument {}", i + 1)))?;
        self.parse(token)
    }

    /// Parse every argument from `start` on.
    pub fn args_from<T: FromStr>(&self, start: usize) -> ScriptResult<Vec<T>> {
        self.args
            .iter()
            .skip(start)
            .map(|t| self.parse(t))
            .collect()
    }

    /// Exactly `N` floating point arguments.
    pub fn floats<const N: usize>(&self) -> ScriptResult<[f64; N]> {
        self.expect_args(N)?;
        let mut out = [0.0; N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.arg(i)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_skips_blank_and_comments() {
        let src = "png 4 4 out.png\n\n   # a comment\n  position 2   0 0\n";
        let cmds: Vec<Command> = tokenize(src).collect();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].keyword, "png");
        assert_eq!(cmds[1].line, 4);
        assert_eq!(cmds[1].args, vec!["2", "0", "0"]);
    }

    #[test]
    fn test_floats_checks_count_and_numbers() {
        let cmd = tokenize("sphere 0 0 -1 0.5").next().unwrap();
        assert_eq!(cmd.floats::<4>().unwrap(), [0.0, 0.0, -1.0, 0.5]);
        assert!(matches!(
            cmd.floats::<3>(),
            Err(ScriptError::Malformed { line: 1, .. })
        ));

        let bad = tokenize("sphere 0 zero 0 1").next().unwrap();
        assert!(matches!(
            bad.floats::<4>(),
            Err(ScriptError::InvalidNumber { ref token, .. }) if token == "zero"
        ));
    }

    #[test]
    fn test_arg_and_args_from() {
        let cmd = tokenize("elements 0 1 2 3").next().unwrap();
        assert_eq!(cmd.arg::<usize>(2).unwrap(), 2);
        assert_eq!(cmd.args_from::<usize>(1).unwrap(), vec![1, 2, 3]);
        assert!(cmd.arg::<usize>(9).is_err());
    }
}
