use std::io::{self, Write};
use std::sync::mpsc;

use clap::Parser;
use portal_core::{update, AppState, AppViewModel, Msg};
use portal_logging::{portal_info, portal_warn};

use super::config::{AppConfig, Cli};
use super::effects::{EffectRunner, EffectSink};
use super::input::{self, UserCommand};
use super::{logging, ui};

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// State-machine message, e.g. a response forwarded from the engine.
    Msg(Msg),
    /// A command typed by the user.
    Command(UserCommand),
    /// Standard input reached end of file.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, loaded) = AppConfig::resolve(&cli)?;
    logging::initialize(config.log_destination, config.log_level);
    if loaded {
        portal_info!("Loaded configuration from {:?}", cli.config);
    } else {
        portal_info!("No configuration at {:?}; using defaults", cli.config);
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(config.api_settings(), event_tx.clone())?;
    input::spawn_reader(event_tx.clone());

    let stdout = io::stdout();
    let mut app = App::new(effects, stdout.lock());
    app.print_lines(&ui::layout::header_lines())?;
    app.dispatch_msg(Msg::Started)?;

    while let Ok(event) = event_rx.recv() {
        if app.handle_event(event)? == Flow::Quit {
            break;
        }
    }

    app.shutdown();
    portal_info!("Session ended");
    Ok(())
}

/// Owns the state store and routes events through `update`.
struct App<S: EffectSink, W: Write> {
    state: AppState,
    effects: S,
    out: W,
}

impl<S: EffectSink, W: Write> App<S, W> {
    fn new(effects: S, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
        }
    }

    fn handle_event(&mut self, event: AppEvent) -> io::Result<Flow> {
        match event {
            AppEvent::Msg(msg) => {
                self.dispatch_msg(msg)?;
                Ok(Flow::Continue)
            }
            AppEvent::Command(command) => self.handle_command(command),
            AppEvent::InputClosed => Ok(Flow::Quit),
        }
    }

    fn handle_command(&mut self, command: UserCommand) -> io::Result<Flow> {
        match command {
            UserCommand::SetProfile(text) => self.dispatch_msg(Msg::ProfileChanged(text))?,
            UserCommand::SetDesc(text) => self.dispatch_msg(Msg::DescChanged(text))?,
            UserCommand::SetExp(text) => self.dispatch_msg(Msg::ExpChanged(text))?,
            UserCommand::SetTechs(text) => self.dispatch_msg(Msg::TechsChanged(text))?,
            UserCommand::SetSearch(text) => self.dispatch_msg(Msg::SearchChanged(text))?,
            UserCommand::Add => {
                if self.refuse_while_pending()? {
                    return Ok(Flow::Continue);
                }
                let issues = self.state.draft().form_issues();
                if issues.is_empty() {
                    self.dispatch_msg(Msg::AddPostSubmitted)?;
                } else {
                    let hint = issues
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    self.notice(&format!("Cannot add job post: {hint}."))?;
                }
            }
            UserCommand::Search(term) => {
                if self.refuse_while_pending()? {
                    return Ok(Flow::Continue);
                }
                if let Some(term) = term {
                    self.dispatch_msg(Msg::SearchChanged(term))?;
                }
                self.dispatch_msg(Msg::SearchSubmitted)?;
            }
            UserCommand::ShowAll => {
                if self.refuse_while_pending()? {
                    return Ok(Flow::Continue);
                }
                self.dispatch_msg(Msg::ShowAllClicked)?;
            }
            UserCommand::Help => self.print_lines(&ui::layout::help_lines())?,
            UserCommand::Quit => return Ok(Flow::Quit),
            UserCommand::Unknown(line) => {
                portal_warn!("Unknown command {:?}", line);
                self.notice(&format!("Unknown command: {line}. Type `help` for commands."))?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Submit controls are disabled while a request is pending.
    fn refuse_while_pending(&mut self) -> io::Result<bool> {
        if self.state.pending() {
            self.notice("Please wait: a request is still in progress.")?;
            return Ok(true);
        }
        Ok(false)
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let maybe_view = {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            let view = state.view();
            let mut state = state;
            let was_dirty = state.consume_dirty();
            self.state = state;
            self.effects.run(effects);
            if was_dirty {
                Some(view)
            } else {
                None
            }
        };

        match maybe_view {
            Some(view) => self.render(&view),
            None => Ok(()),
        }
    }

    fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        self.print_lines(&ui::render::render(view))
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "! {text}")?;
        self.out.flush()
    }

    fn print_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn shutdown(&mut self) {
        self.effects.shutdown();
    }
}
