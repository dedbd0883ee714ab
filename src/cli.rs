use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Compute FIRST and FOLLOW sets of a context-free grammar")]
pub struct Cli {
    /// File containing the grammar, one `A -> rhs` production per line
    pub grammar: PathBuf,

    /// File to write the FIRST and FOLLOW sets to
    pub output: PathBuf,

    /// Start symbol of the grammar
    #[arg(short, long, value_name = "SYMBOL", default_value_t = 'S', value_parser = parse_start)]
    pub start: char,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8
}

fn parse_start(text: &str) -> Result<char, String> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_uppercase() => Ok(c),
        _ => Err(format!("`{}` is not a single uppercase nonterminal", text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from(["firstfollow", "-vv", "--start", "E", "in.cfg", "out.txt"]).unwrap();

        assert_eq!(cli.grammar, PathBuf::from("in.cfg"));
        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert_eq!(cli.start, 'E');
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn default_start() {
        let cli = Cli::try_parse_from(["firstfollow", "in.cfg", "out.txt"]).unwrap();

        assert_eq!(cli.start, 'S');
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn reject_wrong_argument_count() {
        assert!(Cli::try_parse_from(["firstfollow", "in.cfg"]).is_err());
        assert!(Cli::try_parse_from(["firstfollow", "in.cfg", "out.txt", "extra"]).is_err());
    }

    #[test]
    fn reject_bad_start() {
        assert!(parse_start("s").is_err());
        assert!(parse_start("SS").is_err());
        assert!(parse_start("").is_err());
        assert_eq!(parse_start("T"), Ok('T'));
    }
}
