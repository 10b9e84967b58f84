use prompt_feed::{SortField, SortOrder, VoteDirection};

/// One line of input from the visitor. Card positions are zero based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PrevPage,
    GoTo(u32),
    Sort(SortField),
    Order(SortOrder),
    Search(String),
    Vote(usize, VoteDirection),
    Favorite(usize),
    Copy(usize),
    Login,
    Refresh,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(term) = line.strip_prefix('/') {
            return Ok(Command::Search(term.trim().to_string()));
        }

        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "n" | "next" => Ok(Command::NextPage),
            "p" | "prev" => Ok(Command::PrevPage),
            "g" | "go" => arg
                .parse()
                .map(Command::GoTo)
                .map_err(|_| format!("Not a page number: {arg:?}")),
            "s" | "sort" => match arg {
                "id" | "time" => Ok(Command::Sort(SortField::Recency)),
                "votes" | "upvotes" => Ok(Command::Sort(SortField::UpvoteMargin)),
                _ => Err("Sort by `id` or `votes`.".to_string()),
            },
            "o" | "order" => match arg {
                "asc" => Ok(Command::Order(SortOrder::Ascending)),
                "desc" => Ok(Command::Order(SortOrder::Descending)),
                _ => Err("Order is `asc` or `desc`.".to_string()),
            },
            "u" | "up" => position(arg).map(|i| Command::Vote(i, VoteDirection::Up)),
            "d" | "down" => position(arg).map(|i| Command::Vote(i, VoteDirection::Down)),
            "f" | "fav" => position(arg).map(Command::Favorite),
            "c" | "copy" => position(arg).map(Command::Copy),
            "l" | "login" => Ok(Command::Login),
            "r" | "refresh" => Ok(Command::Refresh),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" => Ok(Command::Quit),
            "" => Err("Type `h` for help.".to_string()),
            other => Err(format!("Unknown command {other:?}. Type `h` for help.")),
        }
    }
}

/// Card numbers are shown starting at 1.
fn position(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Not a card number: {arg:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(Command::parse("n"), Ok(Command::NextPage));
        assert_eq!(Command::parse("g 3"), Ok(Command::GoTo(3)));
        assert_eq!(Command::parse("s votes"), Ok(Command::Sort(SortField::UpvoteMargin)));
        assert_eq!(Command::parse("o asc"), Ok(Command::Order(SortOrder::Ascending)));
    }

    #[test]
    fn search_keeps_spaces() {
        assert_eq!(
            Command::parse("/ write a story "),
            Ok(Command::Search("write a story".into()))
        );
        assert_eq!(Command::parse("/"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn card_numbers_are_one_based() {
        assert_eq!(Command::parse("u 1"), Ok(Command::Vote(0, VoteDirection::Up)));
        assert_eq!(Command::parse("c 12"), Ok(Command::Copy(11)));
        assert!(Command::parse("f 0").is_err());
        assert!(Command::parse("d").is_err());
    }

    #[test]
    fn unknown_input_is_an_error() {
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("   ").is_err());
    }
}
