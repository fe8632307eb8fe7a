use crate::interrupt::{Interrupted, Interrupts};
use crate::output;
use crate::slash::{HELP, SlashCommand, parse_slash_command};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use radar_core::{Config, ControllerError, FOLLOW_LIMIT, FollowOutcome, HistoryCategory, Workspace};
use radar_providers::{Analyst, AnalystFactory, MockAnalyst};
use radar_ui::view::nav_line;
use radar_ui::{ExecutionOutcome, Renderer, TagVocabulary, TranscriptController, TranscriptView};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

/// How often the progress line is refreshed while a request runs
const PROGRESS_POLL: Duration = Duration::from_millis(100);

/// One controller plus the view used to print its transcript
pub struct Session {
    controller: TranscriptController,
    view: TranscriptView,
    interrupts: Mutex<Interrupts>,
    width: usize,
    verbose: bool,
}

impl Session {
    pub fn new(config: &Config, mock: bool, verbose: bool, interrupts: Interrupts) -> Result<Self> {
        let analyst: Arc<dyn Analyst> = if mock {
            Arc::new(MockAnalyst::new())
        } else {
            AnalystFactory::create_from_config(config).context("Failed to create analyst")?
        };
        let workspace = Arc::new(Workspace::new(config.user.clone().into()));
        let controller = TranscriptController::new(analyst, workspace, config.execution.clone());
        let view = TranscriptView::new(Renderer::new(TagVocabulary::from(&config.markers)));

        Ok(Self { controller, view, interrupts: Mutex::new(interrupts), width: output::terminal_width(), verbose })
    }

    pub async fn report(&self, company: &str, focus: &[String]) -> Result<ExecutionOutcome> {
        println!("{} Analysing {}", "Info:".blue().bold(), company.cyan());
        let outcome = self.drive(self.controller.run_enterprise_report(company, focus)).await?;
        self.finish(outcome);
        Ok(outcome)
    }

    pub async fn brief(&self, query: &str, context: Option<&str>) -> Result<ExecutionOutcome> {
        println!("{} Interpreting policy", "Info:".blue().bold());
        let run = self.controller.run_policy_brief(query, context, HistoryCategory::Policy);
        let outcome = self.drive(run).await?;
        self.finish(outcome);
        Ok(outcome)
    }

    fn finish(&self, outcome: ExecutionOutcome) {
        tracing::info!(?outcome, messages = self.controller.messages().len(), "request finished");
        self.print_transcript();

        if self.verbose {
            println!("{} Outcome: {:?}", "Info:".blue().bold(), outcome);
        }
        if outcome == ExecutionOutcome::Completed {
            let saved = self.controller.workspace().history().len();
            println!("{} Saved to history ({} total)", "Success:".green().bold(), saved);
        }
    }

    /// Await `run`, echoing progress steps
    ///
    /// The first Ctrl-C cancels a scripted execution. A second one, or any
    /// press while a follow-up is in flight, ends the session with
    /// [`Interrupted`].
    async fn drive<F>(&self, run: F) -> Result<ExecutionOutcome>
    where
        F: Future<Output = std::result::Result<ExecutionOutcome, ControllerError>>,
    {
        tokio::pin!(run);
        let mut interrupts = self.interrupts.lock().await;
        let mut ticker = tokio::time::interval(PROGRESS_POLL);
        let mut last_status: Option<String> = None;
        let mut cancelling = false;

        loop {
            tokio::select! {
                biased;
                outcome = &mut run => return Ok(outcome?),
                _ = interrupts.recv() => {
                    if cancelling || !self.controller.cancel() {
                        tracing::info!("interrupted while a request was running");
                        return Err(Interrupted.into());
                    }
                    cancelling = true;
                    eprintln!("{} Cancelling... (Ctrl-C again to quit)", "Warning:".yellow().bold());
                }
                _ = ticker.tick() => {
                    let messages = self.controller.messages();
                    if let Some(status) = messages.last().filter(|m| m.is_status_placeholder)
                        && last_status.as_deref() != Some(status.text.as_str())
                    {
                        println!("{}", format!("… {}", status.text).dimmed().italic());
                        last_status = Some(status.text.clone());
                    }
                }
            }
        }
    }

    /// Read questions and slash commands until EOF or an empty line
    pub async fn follow_ups<R>(&self, input: R) -> Result<()>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let mut lines = BufReader::new(input).lines();
        println!();
        println!("{}", "Ask a follow-up question (empty line to finish, /help for commands)".dimmed());

        loop {
            print!("{} ", "›".cyan().bold());
            std::io::stdout().flush()?;

            let line = {
                let mut interrupts = self.interrupts.lock().await;
                tokio::select! {
                    line = lines.next_line() => line?,
                    _ = interrupts.recv() => {
                        tracing::info!("interrupted at the prompt");
                        return Err(Interrupted.into());
                    }
                }
            };
            let Some(line) = line else {
                break;
            };
            let input = line.trim();
            if input.is_empty() {
                break;
            }

            if let Some(command) = parse_slash_command(input) {
                self.run_command(command)?;
                continue;
            }

            // the question itself is already on screen
            let start = self.controller.messages().len() + 1;
            self.drive(self.controller.ask(input)).await?;
            self.print_from(start);
        }
        Ok(())
    }

    fn run_command(&self, command: SlashCommand) -> Result<()> {
        tracing::debug!(?command, "slash command");
        let workspace = self.controller.workspace();

        match command {
            SlashCommand::Follow => {
                let name = self.controller.active_report().map(|r| r.company_name).unwrap_or_default();
                match self.controller.follow_current_company() {
                    None => println!("{} No company report is loaded", "Warning:".yellow().bold()),
                    Some(FollowOutcome::Added(_)) => {
                        println!("{} Following {}", "Success:".green().bold(), name.cyan())
                    }
                    Some(FollowOutcome::AlreadyFollowed) => {
                        println!("{} Already following {}", "Info:".blue().bold(), name.cyan())
                    }
                    Some(FollowOutcome::LimitReached) => println!(
                        "{} Watchlist is full ({} companies)",
                        "Warning:".yellow().bold(),
                        FOLLOW_LIMIT
                    ),
                }
            }
            SlashCommand::Unfollow => {
                if self.controller.unfollow_current_company() {
                    println!("{} Removed from watchlist", "Success:".green().bold());
                } else {
                    println!("{} The loaded company is not followed", "Warning:".yellow().bold());
                }
            }
            SlashCommand::Watchlist => {
                let followed = workspace.followed();
                if followed.is_empty() {
                    println!("{}", "Watchlist is empty".dimmed());
                }
                for (i, company) in followed.iter().enumerate() {
                    let industry = company.industry.as_deref().unwrap_or("-");
                    println!(
                        "  {}. {} ({}) {}",
                        i + 1,
                        company.name.bold(),
                        industry,
                        format!("{} unread", company.unread_count()).cyan()
                    );
                    for update in &company.recent_updates {
                        let line = format!("[{}] {} {}", update.kind.label(), update.date, update.text);
                        if update.is_read {
                            println!("     {}", line.dimmed());
                        } else {
                            println!("     {}", line);
                        }
                    }
                }
            }
            SlashCommand::Read(n) => match workspace.followed().get(n - 1) {
                Some(company) if workspace.mark_as_read(&company.id) => {
                    println!("{} Marked {} as read", "Success:".green().bold(), company.name.cyan())
                }
                _ => println!("{} No watchlist entry {}", "Warning:".yellow().bold(), n),
            },
            SlashCommand::History => {
                let history = workspace.history();
                if history.is_empty() {
                    println!("{}", "No saved conversations yet".dimmed());
                }
                for (i, item) in history.iter().enumerate() {
                    println!("  {}. {} {} {}", i + 1, item.date.dimmed(), item.summary, item.category.label().cyan());
                }
            }
            SlashCommand::Restore(n) => match workspace.history().get(n - 1) {
                Some(item) => {
                    self.controller.restore(item)?;
                    self.print_transcript();
                }
                None => println!("{} No history entry {}", "Warning:".yellow().bold(), n),
            },
            SlashCommand::Help => {
                for (usage, about) in HELP {
                    println!("  {:<14} {}", usage.cyan(), about);
                }
            }
            SlashCommand::Invalid(message) => println!("{} {}", "Warning:".yellow().bold(), message),
        }
        Ok(())
    }

    fn print_transcript(&self) {
        let messages = self.controller.messages();
        println!();
        output::print_lines(&self.view.transcript_lines(&messages), self.width);

        let points = self.controller.nav_points();
        if !points.is_empty() {
            println!();
            output::print_lines(&[nav_line(&points)], self.width);
        }
    }

    fn print_from(&self, start: usize) {
        let messages = self.controller.messages();
        for (index, message) in messages.iter().enumerate().skip(start) {
            println!();
            output::print_lines(&self.view.message_lines(index, message), self.width);
        }
    }
}
