use swipedeck::cli::{demo_cards, logger_builder, read_cards, AppConfig, Args};
use swipedeck::tui::{
    self, handle_key_event, handle_mouse_event, CellScale, KeyAction, PointerAction, SwipeTally,
};
use swipedeck::{CardDeck, PanTracker, SwipeDirection};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Poll interval; also the animation frame interval
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Viewport width used until the first frame reports the real one
const INITIAL_VIEWPORT_WIDTH: f32 = 80.0;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config = AppConfig::load(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if args.save_config {
        match config.save_deck() {
            Ok(path) => println!("Saved deck settings to {}", path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    match logger_builder(config.log_file.as_deref()) {
        Ok(mut builder) => {
            let _ = builder.try_init();
        }
        Err(e) => eprintln!("Warning: Failed to open log file: {}", e),
    }

    let cards = match config.cards_file {
        Some(ref path) => read_cards(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => demo_cards(),
    };

    run_app(&config, cards)
}

/// Runs the TUI application with configuration
pub fn run_app(config: &AppConfig, cards: Vec<String>) -> io::Result<()> {
    let tally = Rc::new(RefCell::new(SwipeTally::default()));
    let source: Arc<[String]> = cards.into();

    let liked = Rc::clone(&tally);
    let passed = Rc::clone(&tally);
    let mut deck = CardDeck::with_config(
        Arc::clone(&source),
        INITIAL_VIEWPORT_WIDTH,
        config.deck.clone(),
    )
    .map_err(|e| io::Error::other(e.to_string()))?
    .on_swipe_right(move |card: &String| liked.borrow_mut().record(SwipeDirection::Right, card))
    .on_swipe_left(move |card: &String| passed.borrow_mut().record(SwipeDirection::Left, card));

    info!("dealing {} cards", source.len());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut deck, &source, &tally);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Print summary after exit
    let tally = tally.borrow();
    if tally.total() > 0 {
        println!("\nSwiped {} cards", tally.total());
        println!("   Liked ({}):", tally.liked.len());
        for card in &tally.liked {
            println!("     ✓ {}", card);
        }
        println!("   Passed ({}):", tally.passed.len());
        for card in &tally.passed {
            println!("     ✗ {}", card);
        }
    }

    result
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    deck: &mut CardDeck<String>,
    source: &Arc<[String]>,
    tally: &Rc<RefCell<SwipeTally>>,
) -> io::Result<()> {
    let mut tracker = PanTracker::new();
    let mut top_card: Option<Rect> = None;
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        deck.tick(now.duration_since(last_frame));
        last_frame = now;

        terminal.draw(|frame| {
            let width = tui::content_area(frame.area()).width as f32;
            if let Err(e) = deck.set_viewport_width(width) {
                warn!("keeping previous viewport: {}", e);
            }
            top_card = tui::render(frame, deck, &tally.borrow());
        })?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => match handle_key_event(key) {
                KeyAction::Quit => break,
                KeyAction::SwipeRight => {
                    deck.force_swipe(SwipeDirection::Right);
                }
                KeyAction::SwipeLeft => {
                    deck.force_swipe(SwipeDirection::Left);
                }
                KeyAction::Reload => {
                    // A fresh allocation is a new deck identity, so the cursor resets
                    deck.set_data(source.to_vec());
                }
                KeyAction::None => {}
            },
            Event::Mouse(mouse) => {
                let scale = CellScale::for_deck(deck);
                let gesture = match handle_mouse_event(mouse) {
                    PointerAction::Press { column, row } => {
                        // Only the top card listens for gestures
                        match top_card {
                            Some(rect) if tui::contains(rect, column, row) => {
                                let (x, y) = scale.to_deck(column, row);
                                tracker.press(x, y)
                            }
                            _ => None,
                        }
                    }
                    PointerAction::Drag { column, row } => {
                        let (x, y) = scale.to_deck(column, row);
                        tracker.drag(x, y)
                    }
                    PointerAction::Release { column, row } => {
                        let (x, y) = scale.to_deck(column, row);
                        tracker.release(x, y)
                    }
                    PointerAction::None => None,
                };

                if let Some(gesture) = gesture {
                    deck.handle_gesture(gesture);
                }
            }
            _ => {}
        }
    }

    Ok(())
}
