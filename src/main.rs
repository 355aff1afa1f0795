use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::error::Error;
use std::io;
use std::time::{Duration, Instant};
use tango_quiz::db::init_db;
use tango_quiz::{logger, ui, App, AppConfig, Availability};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    logger::init(&config.log_file);
    logger::log("Starting tango-quiz");

    let availability = Availability::from_config(&config.availability)?;

    let db = match init_db(&config.db_path()) {
        Ok(conn) => Some(conn),
        Err(e) => {
            logger::log(&format!("Result log disabled: {}", e));
            None
        }
    };

    let mut app = App::new(config, availability, db);
    app.check_availability(Utc::now());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Terminal error: {}", e));
    }
    logger::log("Exiting tango-quiz");
    Ok(result?)
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|f| ui::draw_app(f, app, now))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        app.tick(Instant::now());
        if app.should_quit {
            return Ok(());
        }
    }
}
