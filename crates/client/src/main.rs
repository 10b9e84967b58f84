mod api;
mod auth;
mod clipboard;
mod commands;
mod config;
mod models;
mod render;

use colored::*;
use prompt_feed::{
    COPY_FEEDBACK_DELAY, CommunityFeed, CopyMark, Session, VoteOverlay, schedule_clear,
};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use api::HttpPromptApi;
use clipboard::SystemClipboard;
use commands::Command;
use config::Config;

type Feed = CommunityFeed<HttpPromptApi, SystemClipboard>;
type Input = Lines<BufReader<Stdin>>;

// ===== Main =====

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    render::banner();

    let api = HttpPromptApi::new(&config.backend_url);
    let overlay = VoteOverlay::with_cap(config.vote_overlay_cap);
    let mut feed = CommunityFeed::with_overlay(api, SystemClipboard, overlay);
    let mut session: Option<Session> = None;
    let (copy_tx, mut copy_rx) = mpsc::unbounded_channel();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    feed.refresh().await;
    show(&mut feed, session.as_ref());
    println!("{}", "Type `h` for help.".bright_black());

    let mut show_prompt = true;
    loop {
        if show_prompt {
            print!("{}", "> ".bright_green().bold());
            io::stdout().flush()?;
        }
        show_prompt = true;

        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else { break };
                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.red());
                        continue;
                    }
                };
                if command == Command::Quit {
                    break;
                }
                handle(command, &mut feed, &mut session, &config, &copy_tx).await;
            }
            Some(mark) = copy_rx.recv() => {
                if !feed.expire_copy(mark) {
                    // A newer copy owns the marker; the prompt is still on screen.
                    show_prompt = false;
                    continue;
                }
                println!();
            }
        }

        if feed.take_login_request() && confirm_login(&mut input).await? {
            if let Some(new_session) = open_login(&config, &feed).await {
                session = Some(new_session);
            }
        }
        show(&mut feed, session.as_ref());
    }

    println!();
    println!("{}", "Thanks for stopping by! 👋".bright_cyan().bold());
    Ok(())
}

// ===== Event handling =====

async fn handle(
    command: Command,
    feed: &mut Feed,
    session: &mut Option<Session>,
    config: &Config,
    copy_tx: &UnboundedSender<CopyMark>,
) {
    match command {
        Command::NextPage => {
            let next = feed.query().page + 1;
            if feed.set_page(next).await.is_none() {
                println!("{}", "Already on the last page.".yellow());
            }
        }
        Command::PrevPage => {
            let page = feed.query().page;
            if page <= 1 {
                println!("{}", "Already on the first page.".yellow());
            } else {
                feed.set_page(page - 1).await;
            }
        }
        Command::GoTo(page) => {
            if feed.set_page(page).await.is_none() {
                println!("{}", format!("No page {page} to go to.").yellow());
            }
        }
        Command::Sort(field) => {
            feed.set_sort_field(field).await;
        }
        Command::Order(order) => {
            feed.set_sort_order(order).await;
        }
        Command::Search(term) => {
            if let Err(err) = feed.search(session.as_ref(), &term).await {
                debug!("search rejected: {err}");
            }
        }
        Command::Vote(index, direction) => {
            let Some(prompt_id) = prompt_id(feed, index) else {
                return;
            };
            if let Err(err) = feed.vote(session.as_ref(), prompt_id, direction).await {
                debug!("vote not applied: {err}");
            }
        }
        Command::Favorite(index) => {
            let Some(prompt_id) = prompt_id(feed, index) else {
                return;
            };
            match feed.favorite(session.as_mut(), prompt_id).await {
                Ok(report) => debug!(?report, "favorite settled"),
                Err(err) => debug!("favorite rejected: {err}"),
            }
        }
        Command::Copy(index) => match feed.copy(index) {
            Some(mark) => {
                schedule_clear(mark, COPY_FEEDBACK_DELAY, copy_tx.clone());
            }
            None => no_card(index),
        },
        Command::Login => {
            if let Some(new_session) = open_login(config, feed).await {
                *session = Some(new_session);
            }
        }
        Command::Refresh => {
            feed.refresh().await;
        }
        Command::Help => render::help(),
        Command::Quit => {}
    }
}

fn prompt_id(feed: &Feed, index: usize) -> Option<i64> {
    let id = feed.prompts().get(index).map(|prompt| prompt.id);
    if id.is_none() {
        no_card(index);
    }
    id
}

fn no_card(index: usize) {
    println!("{}", format!("No card #{} on this page.", index + 1).yellow());
}

fn show(feed: &mut Feed, session: Option<&Session>) {
    render::page(feed, session);
    render::notices(feed.take_notices());
}

// ===== Login =====

async fn confirm_login(input: &mut Input) -> anyhow::Result<bool> {
    println!("Log in now? [Y/n]");
    print!("> ");
    io::stdout().flush()?;

    Ok(accepts_login(input.next_line().await?.as_deref()))
}

/// An empty answer means yes. End of input means nobody is there to finish
/// a browser login.
fn accepts_login(answer: Option<&str>) -> bool {
    answer.is_some_and(|answer| !answer.trim().to_lowercase().starts_with('n'))
}

async fn open_login(config: &Config, feed: &Feed) -> Option<Session> {
    match auth::login(config, feed.api()).await {
        Ok(session) => {
            println!(
                "{} {}",
                "✅ Logged in as".green().bold(),
                session.username.bright_white()
            );
            Some(session)
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Login failed:".red().bold(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_answer() {
        assert!(accepts_login(Some("")));
        assert!(accepts_login(Some("Y")));
        assert!(!accepts_login(Some(" no")));
        assert!(!accepts_login(None));
    }
}
