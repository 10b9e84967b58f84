use colored::*;
use prompt_feed::{
    Clipboard, CommunityFeed, NOTES_PREVIEW_CHARS, Notice, NoticeLevel, PAGE_SIZE, Prompt,
    PromptApi, Session, truncate,
};

const DISCLAIMER: &str = "Prompts on this page are shared by the community. Their accuracy, \
quality and completeness are not guaranteed. Report problems and they will be handled promptly.";

pub fn banner() {
    println!("{}", "=".repeat(60).bright_cyan());
    println!("{}", "    ✨ COMMUNITY PROMPTS ✨".bright_yellow().bold());
    println!("{}", "=".repeat(60).bright_cyan());
    println!();
}

pub fn page<A: PromptApi, C: Clipboard>(feed: &CommunityFeed<A, C>, session: Option<&Session>) {
    println!("{}", "━".repeat(60).bright_black());
    println!("{}", header(feed, session));
    println!();

    if !feed.is_loaded() {
        for _ in 0..PAGE_SIZE {
            println!("{}", "Loading...".bright_black());
        }
    } else {
        for (index, prompt) in feed.prompts().iter().enumerate() {
            let lines = card(
                index,
                prompt,
                feed.displayed_upvotes(prompt),
                feed.displayed_downvotes(prompt),
                feed.copied_index() == Some(index),
            );
            for line in lines {
                println!("{line}");
            }
            println!();
        }
    }

    println!("{}", footer(feed.query().page, feed.page_count(), feed.total()));
    println!("{}", DISCLAIMER.bright_black().italic());
}

pub fn notices(notices: Vec<Notice>) {
    for notice in notices {
        let line = match notice.level {
            NoticeLevel::Success => format!("✓ {}", notice.text).green(),
            NoticeLevel::Warning => format!("⚠ {}", notice.text).yellow(),
            NoticeLevel::Error => format!("✗ {}", notice.text).red(),
        };
        println!("{line}");
    }
}

pub fn help() {
    println!("{}", "Commands:".bright_white().bold());
    for (keys, what) in [
        ("n / p", "next / previous page"),
        ("g <page>", "go to page"),
        ("s id|votes", "sort by publish time or upvotes"),
        ("o asc|desc", "sort order"),
        ("/ <term>", "search (empty clears)"),
        ("u <#> / d <#>", "upvote / downvote"),
        ("f <#>", "favorite (also upvotes)"),
        ("c <#>", "copy prompt text"),
        ("l", "log in"),
        ("r", "refresh"),
        ("q", "quit"),
    ] {
        println!("  {:<14} {}", keys.bright_cyan(), what.bright_black());
    }
}

fn header<A: PromptApi, C: Clipboard>(
    feed: &CommunityFeed<A, C>,
    session: Option<&Session>,
) -> String {
    let query = feed.query();
    let account = match session {
        Some(session) => format!("♥ My favorites (@{})", session.username),
        None => "[l] Login".to_string(),
    };
    let mut line = format!(
        "⌂ Home  {}  Sort: {} / {}",
        account,
        query.sort_field.label(),
        query.sort_order.label()
    );
    if !query.search_term.is_empty() {
        line.push_str(&format!("  Search: \"{}\"", query.search_term));
    }
    line
}

fn card(index: usize, prompt: &Prompt, upvotes: u32, downvotes: u32, copied: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        format!("[{}]", index + 1).bright_cyan(),
        prompt.title.bright_white().bold(),
        format!("@{}", prompt.owner).bright_black()
    )];
    if let Some(remark) = prompt.remark.as_deref().filter(|r| !r.is_empty()) {
        lines.push(format!("    👉 {remark}"));
    }
    lines.push(format!("    {}", prompt.description));
    if let Some(notes) = prompt.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!(
            "    {}",
            truncate(notes, NOTES_PREVIEW_CHARS).bright_black().italic()
        ));
    }
    let copied = if copied {
        " Copied".green().to_string()
    } else {
        String::new()
    };
    lines.push(format!(
        "    {}  {}  {}{}",
        format!("▲ {upvotes}").green(),
        format!("▼ {downvotes}").red(),
        "⧉".bright_black(),
        copied
    ));
    lines
}

fn footer(page: u32, page_count: u32, total: u64) -> String {
    format!("Page {} / {} (total {})", page, page_count.max(1), total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            id: 1,
            title: "Poet".into(),
            description: "Write a poem".into(),
            remark: Some("for fun".into()),
            notes: Some("n".repeat(400)),
            owner: "ann".into(),
            upvotes: 3,
            downvotes: 1,
        }
    }

    #[test]
    fn card_shows_remark_truncated_notes_and_marker() {
        colored::control::set_override(false);
        let lines = card(0, &prompt(), 4, 1, true);

        assert_eq!(lines[0], "[1] Poet @ann");
        assert_eq!(lines[1], "    👉 for fun");
        assert_eq!(lines[2], "    Write a poem");
        assert_eq!(lines[3], format!("    {}...", "n".repeat(300)));
        assert!(lines[4].contains("▲ 4"));
        assert!(lines[4].ends_with("Copied"));
    }

    #[test]
    fn card_without_extras() {
        colored::control::set_override(false);
        let mut bare = prompt();
        bare.remark = None;
        bare.notes = None;

        let lines = card(2, &bare, 3, 1, false);
        assert_eq!(lines.len(), 3);
        assert!(!lines[2].contains("Copied"));
    }

    #[test]
    fn footer_has_at_least_one_page() {
        assert_eq!(footer(1, 0, 0), "Page 1 / 1 (total 0)");
        assert_eq!(footer(2, 4, 40), "Page 2 / 4 (total 40)");
    }
}
