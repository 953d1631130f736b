use std::io::Write;
use std::path::Path;
use std::process::ExitStatus;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use stopwatcher_core::api::{current_dir, AppContext, CliError};
use tokio::process::Command;

use super::web;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    WebPage,
    Manifest,
    Record,
    Exit,
}

impl MenuChoice {
    fn label(self) -> &'static str {
        match self {
            MenuChoice::WebPage => "Web-based Stopwatch Application",
            MenuChoice::Manifest => "Manifest Generator",
            MenuChoice::Record => "Recording Session",
            MenuChoice::Exit => "Exit",
        }
    }

    fn subcommand(self) -> Option<&'static str> {
        match self {
            MenuChoice::Manifest => Some("manifest"),
            MenuChoice::Record => Some("record"),
            MenuChoice::WebPage | MenuChoice::Exit => None,
        }
    }
}

const MENU: [MenuChoice; 4] = [
    MenuChoice::WebPage,
    MenuChoice::Manifest,
    MenuChoice::Record,
    MenuChoice::Exit,
];

pub fn parse_menu_choice(raw: &str) -> Option<MenuChoice> {
    match raw.trim() {
        "1" => Some(MenuChoice::WebPage),
        "2" => Some(MenuChoice::Manifest),
        "3" => Some(MenuChoice::Record),
        "4" => Some(MenuChoice::Exit),
        _ => None,
    }
}

pub async fn run(ctx: &AppContext) -> Result<i32, CliError> {
    let exe = std::env::current_exe()?;
    loop {
        draw_menu()?;
        let Some(line) = read_line("\nEnter your choice (1-4): ").await? else {
            break;
        };
        let Some(choice) = parse_menu_choice(&line) else {
            println!("\nInvalid choice. Please enter a number between 1 and 4.");
            if !wait_for_enter("\nPress Enter to continue...").await? {
                break;
            }
            continue;
        };
        tracing::info!(?choice, "menu selection");

        match choice {
            MenuChoice::Exit => break,
            MenuChoice::WebPage => {
                let page = web::resolve_page(None, &ctx.cfg().launcher.web_page, &current_dir());
                if let Err(e) = web::open_page(&page).await {
                    tracing::warn!(error = %e, "web page launch failed");
                    println!("\nError launching {}: {e}", choice.label());
                }
            }
            MenuChoice::Manifest | MenuChoice::Record => {
                let sub = choice.subcommand().unwrap_or_default();
                match run_tool(&exe, sub).await {
                    Ok(status) if status.success() => {
                        println!("\n{} completed.", choice.label());
                    }
                    Ok(status) => {
                        tracing::warn!(%status, sub, "tool exited with failure");
                        println!("\nError running {}: exited with {status}", choice.label());
                    }
                    Err(e) => {
                        tracing::error!(error = %e, sub, "tool launch failed");
                        println!("\nError launching {}: {e}", choice.label());
                    }
                }
            }
        }
        if !wait_for_enter("\nPress Enter to return to the menu...").await? {
            break;
        }
    }

    println!("\nExiting Session Stopwatcher Launcher. Goodbye!");
    Ok(0)
}

fn draw_menu() -> Result<(), CliError> {
    let mut stdout = std::io::stdout();
    if atty::is(atty::Stream::Stdout) {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    let rule = "=".repeat(50);
    writeln!(stdout, "{rule}")?;
    writeln!(stdout, "         SESSION STOPWATCHER LAUNCHER         ")?;
    writeln!(stdout, "{rule}")?;
    writeln!(stdout, "\nChoose a component to launch:\n")?;
    for (i, choice) in MENU.iter().enumerate() {
        writeln!(stdout, "{}. {}", i + 1, choice.label())?;
    }
    writeln!(stdout, "\n{rule}")?;
    Ok(())
}

/// Runs `<this binary> <sub>` with the terminal handed over to it.
async fn run_tool(exe: &Path, sub: &str) -> Result<ExitStatus, CliError> {
    let mut child = Command::new(exe).arg(sub).spawn()?;
    loop {
        tokio::select! {
            status = child.wait() => return Ok(status?),
            _ = tokio::signal::ctrl_c() => {
                // the child receives the same interrupt and shuts down itself
                tracing::debug!(sub, "interrupt while tool running");
            }
        }
    }
}

/// `None` at end of input or on Ctrl+C.
async fn read_line(prompt: &str) -> Result<Option<String>, CliError> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|n| (n, line))
    });
    tokio::select! {
        res = read => {
            let (n, line) = res.map_err(|e| CliError::Command(format!("stdin task failed: {e}")))??;
            Ok((n > 0).then_some(line))
        }
        _ = tokio::signal::ctrl_c() => Ok(None),
    }
}

/// `false` when the user is leaving instead of pressing Enter.
async fn wait_for_enter(prompt: &str) -> Result<bool, CliError> {
    Ok(read_line(prompt).await?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        assert_eq!(parse_menu_choice("1"), Some(MenuChoice::WebPage));
        assert_eq!(parse_menu_choice(" 3\n"), Some(MenuChoice::Record));
        assert_eq!(parse_menu_choice("4"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("5"), None);
        assert_eq!(parse_menu_choice("two"), None);
        assert_eq!(parse_menu_choice(""), None);
    }

    #[test]
    fn only_tools_have_subcommands() {
        assert_eq!(MenuChoice::Manifest.subcommand(), Some("manifest"));
        assert_eq!(MenuChoice::Record.subcommand(), Some("record"));
        assert_eq!(MenuChoice::WebPage.subcommand(), None);
        assert_eq!(MENU.len(), 4);
    }
}
