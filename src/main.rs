use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use schemaform::app::App;
use schemaform::events;
use schemaform::schema::model::JsonSchema;
use schemaform::schema::uischema::{generate_default_uischema, UiSchema};
use schemaform::ui::{self, Theme};

#[derive(Parser, Debug)]
#[command(name = "schemaform")]
#[command(about = "Schema-driven TUI for rendering and editing JSON documents as forms")]
struct Args {
    /// Path to the JSON Schema describing the document
    #[arg(short, long)]
    schema: PathBuf,

    /// Path to a UI schema; derived from the schema when omitted
    #[arg(short, long)]
    uischema: Option<PathBuf>,

    /// Path to the initial JSON document; an empty document when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Where 'w' writes the document (defaults to the data path)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Theme: "dark", "light" or "auto"
    #[arg(long, default_value = "auto")]
    theme: String,
}

fn main() -> Result<()> {
    // Log to stderr, filtered by RUST_LOG; silent by default.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let schema: JsonSchema = load_json(&args.schema)
        .with_context(|| format!("reading schema {}", args.schema.display()))?;

    let uischema: UiSchema = match &args.uischema {
        Some(path) => {
            load_json(path).with_context(|| format!("reading uischema {}", path.display()))?
        }
        None => generate_default_uischema(&schema),
    };

    let data: Value = match &args.data {
        Some(path) => {
            load_json(path).with_context(|| format!("reading document {}", path.display()))?
        }
        None => Value::Object(serde_json::Map::new()),
    };

    let theme = Theme::from_name(&args.theme)
        .with_context(|| format!("unknown theme {:?}", args.theme))?;

    let mut app = App::new(schema, &uischema, data, theme)?;
    app.document_path = args.out.or(args.data);

    run_tui(&mut app)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Run the TUI event loop until the user quits.
fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, area);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(6),    // Form body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::widgets::render_header(frame, app, chunks[0]);
            ui::widgets::render_body(frame, app, chunks[1]);
            ui::widgets::render_status_bar(frame, app, chunks[2]);

            if app.show_help {
                ui::widgets::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
