//! Main chat event loop
//!
//! Owns the terminal, the crossterm event reader task, and the request
//! service. All state transitions run through the action reducer; this
//! module only routes events to actions and executes the commands the
//! reducer returns.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, Mutex};

use crate::api::{ApiEvent, RequestService};
use crate::commands::{process_input, CommandResult};
use crate::core::app::{apply_action, apply_actions, bootstrap_session, App, AppAction, AppCommand};
use crate::ui::renderer::ui;

type SharedTerminal = Arc<Mutex<Terminal<CrosstermBackend<io::Stdout>>>>;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

const GREETING: &str =
    "Paste study notes or describe a topic to build a vocabulary list. Type /help for commands.";

/// Lines scrolled per wheel notch and per PageUp/PageDown press.
const WHEEL_SCROLL_LINES: u16 = 3;
const PAGE_SCROLL_LINES: u16 = 10;

#[derive(Default)]
struct KeyOutcome {
    actions: Vec<AppAction>,
    quit: bool,
}

fn is_press(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Route one key event. While the suggestions overlay is open it captures
/// navigation and selection keys; everything else feeds the input editor.
fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    let mut outcome = KeyOutcome::default();
    if !is_press(&key) {
        return outcome;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                outcome.quit = true;
                return outcome;
            }
            KeyCode::Char('s') => {
                outcome.actions.push(AppAction::SaveRequested);
                return outcome;
            }
            KeyCode::Char('y') => {
                outcome.actions.push(AppAction::CopyLatestPreview);
                return outcome;
            }
            _ => {}
        }
    }

    if let Some(picker) = app.ui.suggestion_picker.as_mut() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => picker.move_up(),
            KeyCode::Down | KeyCode::Char('j') => picker.move_down(),
            KeyCode::Char(' ') => {
                let index = picker.cursor;
                outcome.actions.push(AppAction::ToggleSuggestion { index });
            }
            KeyCode::Char('a') => outcome.actions.push(AppAction::ToggleAllSuggestions),
            KeyCode::Enter => outcome.actions.push(AppAction::ConfirmSuggestions),
            KeyCode::Esc => outcome.actions.push(AppAction::DismissSuggestions),
            _ => {}
        }
        return outcome;
    }

    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            app.ui.textarea.insert_newline();
        }
        KeyCode::Enter => {
            let text = app.ui.take_input_text();
            if text.trim().is_empty() {
                return outcome;
            }
            match process_input(app, &text) {
                CommandResult::Continue => {}
                CommandResult::Quit => outcome.quit = true,
                CommandResult::Dispatch(action) => outcome.actions.push(action),
                CommandResult::ProcessAsMessage(text) => {
                    outcome.actions.push(AppAction::SubmitInput { text });
                }
            }
        }
        // Arrows scroll the transcript while the input is a single line;
        // in a multi-line draft they move the editor cursor instead.
        KeyCode::Up if app.ui.input_line_count() <= 1 => app.ui.scroll_up(1),
        KeyCode::Down if app.ui.input_line_count() <= 1 => app.ui.scroll_down(1),
        KeyCode::PageUp => app.ui.scroll_up(PAGE_SCROLL_LINES),
        KeyCode::PageDown => app.ui.scroll_down(PAGE_SCROLL_LINES),
        KeyCode::End => app.ui.scroll_to_bottom(),
        _ => {
            app.ui.textarea.input(tui_textarea::Input::from(key));
        }
    }
    outcome
}

fn run_command(service: &RequestService, command: AppCommand) {
    match command {
        AppCommand::Spawn(params) => service.spawn_request(params),
    }
}

async fn apply_api_events(
    app: &Arc<Mutex<App>>,
    api_rx: &mut mpsc::UnboundedReceiver<(ApiEvent, u64)>,
) -> bool {
    let mut received_any = false;
    while let Ok((api_event, request_id)) = api_rx.try_recv() {
        received_any = true;
        let action = match api_event {
            ApiEvent::Process(result) => AppAction::ProcessCompleted { request_id, result },
            ApiEvent::Refine(result) => AppAction::RefineCompleted { request_id, result },
            ApiEvent::Save(result) => AppAction::SaveCompleted { request_id, result },
        };
        let mut app_guard = app.lock().await;
        // Completions never spawn follow-up requests
        apply_action(&mut app_guard, action);
    }
    received_any
}

async fn process_ui_events(
    app: &Arc<Mutex<App>>,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    service: &RequestService,
) -> bool {
    let mut processed_any = false;
    while let Ok(UiEvent::Crossterm(ev)) = event_rx.try_recv() {
        processed_any = true;
        match ev {
            Event::Key(key) => {
                let mut app_guard = app.lock().await;
                let outcome = handle_key(&mut app_guard, key);
                if outcome.quit {
                    app_guard.request_exit();
                }
                let commands = apply_actions(&mut app_guard, outcome.actions);
                drop(app_guard);
                for command in commands {
                    run_command(service, command);
                }
            }
            Event::Mouse(mouse) => {
                let mut app_guard = app.lock().await;
                match mouse.kind {
                    MouseEventKind::ScrollUp => app_guard.ui.scroll_up(WHEEL_SCROLL_LINES),
                    MouseEventKind::ScrollDown => app_guard.ui.scroll_down(WHEEL_SCROLL_LINES),
                    _ => {}
                }
            }
            Event::Paste(text) => {
                let sanitized = text.replace("\r\n", "\n").replace('\r', "\n");
                let mut app_guard = app.lock().await;
                app_guard.ui.textarea.insert_str(&sanitized);
            }
            Event::Resize(..) => {}
            _ => {}
        }
    }
    processed_any
}

async fn is_exit_requested(app: &Arc<Mutex<App>>) -> bool {
    app.lock().await.exit_requested()
}

async fn try_draw_frame(
    app: &Arc<Mutex<App>>,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> Result<(), Box<dyn Error>> {
    if *request_redraw && last_draw.elapsed() >= frame_duration {
        let mut app_guard = app.lock().await;
        let mut terminal_guard = terminal.lock().await;
        terminal_guard.draw(|f| ui(f, &mut app_guard))?;
        *last_draw = Instant::now();
        *request_redraw = false;
    }
    Ok(())
}

pub async fn run_chat(
    base_url_flag: Option<&str>,
    theme_flag: Option<&str>,
    log: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let bootstrap = bootstrap_session(base_url_flag, theme_flag, log)?;
    let mut app = App::new(bootstrap.session, bootstrap.theme);
    app.conversation().add_system_message(GREETING);
    let app = Arc::new(Mutex::new(app));

    // Setup terminal only after successful app creation
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    let terminal: SharedTerminal = Arc::new(Mutex::new(Terminal::new(CrosstermBackend::new(
        io::stdout(),
    ))?));

    let (request_service, mut api_rx) = RequestService::new();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();

    // Async event reader task: short poll so it never blocks the runtime
    let event_reader_handle = {
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(true) = event::poll(Duration::from_millis(10)) {
                    match event::read() {
                        Ok(ev) => {
                            if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                                break;
                            }
                        }
                        Err(_) => continue,
                    }
                } else {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    // Drawing cadence control
    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now();
    let mut request_redraw = true;
    let mut last_indicator_frame = Instant::now() - frame_duration;

    let result = 'main_loop: loop {
        if is_exit_requested(&app).await {
            break 'main_loop Ok(());
        }

        try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await?;

        let events_processed = process_ui_events(&app, &mut event_rx, &request_service).await;
        if events_processed {
            request_redraw = true;
        }

        let received_any = apply_api_events(&app, &mut api_rx).await;
        if received_any {
            request_redraw = true;
        }

        let (in_flight, status_expired) = {
            let mut app_guard = app.lock().await;
            let expired = app_guard.ui.expire_status(Instant::now());
            (app_guard.session.in_flight, expired)
        };
        if status_expired {
            request_redraw = true;
        }

        // Keep the pulse indicator animating while a request is live
        if in_flight {
            let now = Instant::now();
            if now.duration_since(last_indicator_frame) >= frame_duration {
                request_redraw = true;
                last_indicator_frame = now;
            }
        }

        let idle = !events_processed && !received_any && !request_redraw;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    event_reader_handle.abort();

    disable_raw_mode()?;
    {
        let mut terminal_guard = terminal.lock().await;
        execute!(
            terminal_guard.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            DisableMouseCapture
        )?;
        terminal_guard.show_cursor()?;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequestKind;
    use crate::ui::suggestions::SuggestionPicker;
    use crate::utils::test_utils::create_test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn enter_submits_the_drafted_text_as_an_action() {
        let mut app = create_test_app();
        app.ui.textarea.insert_str("learn idioms");

        let outcome = handle_key(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::SubmitInput { text }] if text == "learn idioms"
        ));
        assert_eq!(app.ui.input_text(), "");
    }

    #[test]
    fn enter_on_an_empty_draft_does_nothing() {
        let mut app = create_test_app();
        let outcome = handle_key(&mut app, key(KeyCode::Enter));
        assert!(outcome.actions.is_empty());
        assert!(!outcome.quit);
    }

    #[test]
    fn alt_enter_inserts_a_newline_instead_of_sending() {
        let mut app = create_test_app();
        app.ui.textarea.insert_str("line one");
        let outcome = handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT),
        );
        assert!(outcome.actions.is_empty());
        assert_eq!(app.ui.input_line_count(), 2);
    }

    #[test]
    fn control_shortcuts_map_to_session_actions() {
        let mut app = create_test_app();
        assert!(matches!(
            handle_key(&mut app, ctrl('s')).actions.as_slice(),
            [AppAction::SaveRequested]
        ));
        assert!(matches!(
            handle_key(&mut app, ctrl('y')).actions.as_slice(),
            [AppAction::CopyLatestPreview]
        ));
        assert!(handle_key(&mut app, ctrl('c')).quit);
    }

    #[test]
    fn slash_commands_route_through_the_registry() {
        let mut app = create_test_app();
        app.ui.textarea.insert_str("/save");
        let outcome = handle_key(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::SaveRequested]
        ));

        app.ui.textarea.insert_str("/quit");
        assert!(handle_key(&mut app, key(KeyCode::Enter)).quit);
    }

    #[test]
    fn overlay_captures_navigation_and_selection_keys() {
        let mut app = create_test_app();
        app.ui.suggestion_picker = Some(SuggestionPicker::new(vec![
            "one".to_string(),
            "two".to_string(),
        ]));

        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.ui.suggestion_picker.as_ref().unwrap().cursor, 1);

        let outcome = handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::ToggleSuggestion { index: 1 }]
        ));

        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Enter)).actions.as_slice(),
            [AppAction::ConfirmSuggestions]
        ));
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Esc)).actions.as_slice(),
            [AppAction::DismissSuggestions]
        ));
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Char('a')))
                .actions
                .as_slice(),
            [AppAction::ToggleAllSuggestions]
        ));
    }

    #[test]
    fn typing_while_the_overlay_is_open_does_not_reach_the_input() {
        let mut app = create_test_app();
        app.ui.suggestion_picker = Some(SuggestionPicker::new(vec!["one".to_string()]));
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.ui.input_text(), "");
    }

    #[test]
    fn arrows_scroll_only_while_the_draft_is_single_line() {
        let mut app = create_test_app();
        app.ui.scroll_offset = 5;
        app.ui.auto_scroll = false;
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.ui.scroll_offset, 4);

        app.ui.textarea.insert_str("one\ntwo");
        let before = app.ui.scroll_offset;
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.ui.scroll_offset, before);
    }

    #[tokio::test]
    async fn submitted_actions_spawn_requests_and_completions_apply() {
        let app = Arc::new(Mutex::new(create_test_app()));
        let (service, mut api_rx) = RequestService::new();

        // Reduce a submission and check the spawned request shape
        let command = {
            let mut app_guard = app.lock().await;
            apply_action(
                &mut app_guard,
                AppAction::SubmitInput {
                    text: "learn idioms".to_string(),
                },
            )
        };
        let params = match command {
            Some(AppCommand::Spawn(params)) => params,
            None => panic!("expected a spawn command"),
        };
        assert!(matches!(params.kind, RequestKind::Process(_)));

        // Simulate the service completing that request
        service.send_for_test(
            ApiEvent::Process(Ok(crate::api::ProcessResponse {
                preview: "1. idiom 成语".to_string(),
                items: None,
                theme: None,
                grammar: None,
                suggestions: None,
            })),
            params.request_id,
        );

        let received = apply_api_events(&app, &mut api_rx).await;
        assert!(received);

        let app_guard = app.lock().await;
        assert!(app_guard.notebook.has_processed);
        assert_eq!(
            app_guard.ui.latest_preview().unwrap().content,
            "1. idiom 成语"
        );
    }

    #[tokio::test]
    async fn stale_completions_are_ignored_by_the_loop() {
        let app = Arc::new(Mutex::new(create_test_app()));
        let (service, mut api_rx) = RequestService::new();

        {
            let mut app_guard = app.lock().await;
            apply_action(
                &mut app_guard,
                AppAction::SubmitInput {
                    text: "first".to_string(),
                },
            );
            apply_action(
                &mut app_guard,
                AppAction::SubmitInput {
                    text: "second batch\n\nof notes".to_string(),
                },
            );
        }

        let stale_id = {
            let app_guard = app.lock().await;
            app_guard.session.current_request_id - 1
        };
        service.send_for_test(
            ApiEvent::Process(Ok(crate::api::ProcessResponse {
                preview: "stale".to_string(),
                items: None,
                theme: None,
                grammar: None,
                suggestions: None,
            })),
            stale_id,
        );

        apply_api_events(&app, &mut api_rx).await;

        let app_guard = app.lock().await;
        assert!(!app_guard.notebook.has_processed);
        assert!(app_guard.ui.latest_preview().is_none());
    }
}
