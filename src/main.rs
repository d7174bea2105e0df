mod app;
mod cli;
mod config;
mod error;
mod logic;
mod models;
mod report;
mod ui;

use anyhow::Context;
use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logic::AdvisorService;
use models::{Domain, FieldConditions};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use serde::Serialize;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{AdviceScreen, ConditionsScreen, ForecastScreen, IrrigationScreen};
use ui::Theme;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let tui = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.verbose, tui);

    match cli.command {
        Some(Commands::Init { output }) => {
            let (_, path) = Config::setup_interactive(output)?;
            println!("Configuration written to {}", path.display());
            Ok(())
        }
        Some(Commands::Check) => check(cli.config, cli.format),
        Some(Commands::Tui) | None => {
            let config = load_config(cli.config)?;
            run_tui(config)
        }
        Some(command) => {
            let config = load_config(cli.config)?;
            let mut advisor = AdvisorService::from_config(config)
                .context("Failed to load the geography reference")?;
            run_command(&mut advisor, command, cli.format)
        }
    }
}

/// `warn` by default, `-v` debug, `-vv` trace. `RUST_LOG` wins over both.
/// The dashboard owns the terminal, so it logs nothing unless asked to.
fn init_logging(verbose: u8, tui: bool) {
    let default = match verbose {
        0 if tui => "off",
        0 => "warn",
        1 => "farmwise=debug",
        _ => "farmwise=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<std::path::PathBuf>) -> anyhow::Result<Config> {
    Config::load(path).context("Failed to load configuration (run `farmwise init` to create one)")
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn run_command(
    advisor: &mut AdvisorService,
    command: Commands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let separator = advisor.config().report.issue_separator.clone();

    match command {
        Commands::Extract { domain, text } => {
            let record = advisor.extract(&text, domain.into());
            emit(format, &record, || report::render_record(&record, &separator))
        }
        Commands::Pesticide(args) => {
            let (record, result) = match &args.text {
                Some(text) => advisor.advise_text(text, Domain::Pesticide)?,
                None => {
                    let form = args.to_form(advisor.default_region());
                    advisor.advise_form(Domain::Pesticide, &form)?
                }
            };
            let value = serde_json::json!({ "parameters": record, "recommendation": result });
            emit(format, &value, || {
                format!(
                    "{}\n{}",
                    report::render_record(&record, &separator),
                    report::render_recommendation(&result)
                )
            })
        }
        Commands::Fertilizer(args) => {
            let (record, result) = match &args.text {
                Some(text) => advisor.advise_text(text, Domain::Fertilizer)?,
                None => {
                    let form = args.to_form(advisor.default_region());
                    advisor.advise_form(Domain::Fertilizer, &form)?
                }
            };
            let value = serde_json::json!({ "parameters": record, "recommendation": result });
            emit(format, &value, || {
                format!(
                    "{}\n{}",
                    report::render_record(&record, &separator),
                    report::render_recommendation(&result)
                )
            })
        }
        Commands::Irrigation(args) => {
            let comparison = advisor.compare_irrigation(&FieldConditions::from(&args))?;
            emit(format, &comparison, || report::render_irrigation(&comparison))
        }
        Commands::Yield(args) => {
            let estimate = advisor.estimate_yield(&FieldConditions::from(&args))?;
            emit(format, &estimate, || report::render_yield(&estimate))
        }
        Commands::Suggest(args) => {
            let suggestion = advisor.suggest_crops(&FieldConditions::from(&args))?;
            emit(format, &suggestion, || report::render_suggestion(&suggestion))
        }
        Commands::Regions => {
            let geography = advisor.geography();
            emit(format, geography, || report::render_regions(geography))
        }
        Commands::Init { .. } | Commands::Check | Commands::Tui => {
            anyhow::bail!("not an advisory command")
        }
    }
}

fn check(path: Option<std::path::PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(path)?;
    let advisor = AdvisorService::from_config(config.clone())
        .context("Geography reference failed validation")?;
    let geography = advisor.geography();

    let summary = serde_json::json!({
        "config": config,
        "regions": geography.regions().len(),
        "districts": geography.district_count(),
        "default_region": advisor.default_region(),
        "scorers": advisor.scorer_names(),
        "yield_rules": advisor.yield_rules().iter().map(|(id, _)| *id).collect::<Vec<_>>(),
    });

    emit(format, &summary, || {
        format!(
            "Configuration OK\n  Regions:        {}\n  Districts:      {}\n  Default region: {}\n  Jitter:         {}\n  Strict checks:  {}\n  Scorers:        {}\n  Yield rules:    {}\n",
            geography.regions().len(),
            geography.district_count(),
            advisor.default_region(),
            if config.scoring.jitter {
                format!("on (spread {})", config.scoring.jitter_spread)
            } else {
                "off".to_string()
            },
            config.validation.strict,
            advisor.scorer_names().join(", "),
            advisor
                .yield_rules()
                .iter()
                .map(|(_, name)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        )
    })
}

fn run_tui(config: Config) -> anyhow::Result<()> {
    let mut app = App::new(config).context("Failed to start the dashboard")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let separator = app.advisor.config().report.issue_separator.clone();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Tabs
                    Constraint::Min(10),   // Screen
                    Constraint::Length(1), // Status
                ])
                .split(f.area());

            f.render_widget(Paragraph::new(tab_line(app.screen)), chunks[0]);

            let area = chunks[1];
            match app.screen {
                Screen::Pesticide | Screen::Fertilizer => {
                    let domain = if app.screen == Screen::Pesticide {
                        Domain::Pesticide
                    } else {
                        Domain::Fertilizer
                    };
                    let state = app.advice_state(domain);
                    let screen = AdviceScreen::new(state.domain, state.input.as_str())
                        .editing(state.editing, state.input.cursor())
                        .with_advice(state.record.as_ref(), state.result.as_ref())
                        .with_selection(state.selected_index)
                        .issue_separator(&separator);
                    f.render_widget(screen, area);
                }
                Screen::Conditions => {
                    let state = &app.conditions_state;
                    let screen = ConditionsScreen::new(&app.conditions)
                        .with_focus(state.focused_field)
                        .editing(state.editing, state.edit_buffer.as_str());
                    f.render_widget(screen, area);
                }
                Screen::Irrigation => {
                    let screen = IrrigationScreen::new(&app.conditions)
                        .with_comparison(app.irrigation.as_ref())
                        .with_error(app.model_error.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Forecast => {
                    let screen = ForecastScreen::new(&app.conditions)
                        .with_results(app.estimate.as_ref(), app.suggestion.as_ref())
                        .with_error(app.model_error.as_deref());
                    f.render_widget(screen, area);
                }
            }

            if let Some(status) = &app.status_message {
                f.render_widget(
                    Paragraph::new(Span::styled(status.as_str(), Theme::warning())),
                    chunks[2],
                );
            }
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let editing = is_editing(app);

                // Global key handling
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Char('q') if !editing => app.quit(),
                    KeyCode::Esc if !editing => app.switch_screen(Screen::Pesticide),
                    KeyCode::Char(c) if !editing => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code);
                        }
                    }
                    _ => handle_screen_input(app, key.code),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn tab_line(active: Screen) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, screen) in Screen::all().iter().enumerate() {
        let style = if *screen == active {
            Theme::highlight()
        } else {
            Theme::nav_label()
        };
        spans.push(Span::styled(format!("[{}]", i + 1), Theme::nav_key()));
        spans.push(Span::styled(format!("{} ", screen.label()), style));
    }
    spans.push(Span::styled("[q]", Theme::nav_key()));
    spans.push(Span::styled("Quit", Theme::nav_label()));
    Line::from(spans)
}

fn is_editing(app: &App) -> bool {
    match app.screen {
        Screen::Pesticide => app.pesticide_state.editing,
        Screen::Fertilizer => app.fertilizer_state.editing,
        Screen::Conditions => app.conditions_state.editing,
        Screen::Irrigation | Screen::Forecast => false,
    }
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Pesticide => handle_advice_input(app, Domain::Pesticide, code),
        Screen::Fertilizer => handle_advice_input(app, Domain::Fertilizer, code),
        Screen::Conditions => handle_conditions_input(app, code),
        Screen::Irrigation | Screen::Forecast => handle_results_input(app, code),
    }
}

fn handle_advice_input(app: &mut App, domain: Domain, code: KeyCode) {
    let state = app.advice_state_mut(domain);
    if state.editing {
        match code {
            KeyCode::Esc => state.editing = false,
            KeyCode::Enter => app.submit_advice(domain),
            KeyCode::Backspace => state.input.backspace(),
            KeyCode::Left => state.input.left(),
            KeyCode::Right => state.input.right(),
            KeyCode::Char(c) => state.input.insert(c),
            _ => {}
        }
    } else {
        match code {
            KeyCode::Char('e') | KeyCode::Enter => state.editing = true,
            KeyCode::Up => state.prev(),
            KeyCode::Down | KeyCode::Tab => state.next(),
            KeyCode::Char('c') => {
                state.clear();
                app.clear_status();
            }
            _ => {}
        }
    }
}

fn handle_conditions_input(app: &mut App, code: KeyCode) {
    if app.conditions_state.editing {
        match code {
            KeyCode::Esc => app.conditions_state.cancel_editing(),
            KeyCode::Enter => {
                let value = app.conditions_state.finish_editing();
                let field = app.conditions_state.focused_field;
                app.apply_condition(field, &value);
            }
            KeyCode::Backspace => app.conditions_state.edit_buffer.backspace(),
            KeyCode::Left => app.conditions_state.edit_buffer.left(),
            KeyCode::Right => app.conditions_state.edit_buffer.right(),
            KeyCode::Char(c) => app.conditions_state.edit_buffer.insert(c),
            _ => {}
        }
    } else {
        match code {
            KeyCode::Up => app.conditions_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => app.conditions_state.next_field(),
            KeyCode::Enter => {
                let field = app.conditions_state.focused_field;
                let current = app.conditions.value_of(field.key()).unwrap_or_default();
                app.conditions_state.start_editing(&current);
            }
            KeyCode::Char('r') => app.reset_conditions(),
            _ => {}
        }
    }
}

fn handle_results_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Char('r') = code {
        app.recompute();
        if app.model_error.is_none() {
            app.set_status("Models re-run on the current field conditions");
        }
    }
}
