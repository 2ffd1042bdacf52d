use crate::{
    command::{Command, Submission, classify_submission},
    input::InputLine,
    markdown,
    pipeline::{Pipeline, PipelineError},
    shutdown::ShutdownHandle,
    styles,
    transcript::TranscriptLine,
    view::{self, ViewSnap},
};
use anyhow::Result;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, style::Style};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const MAILBOX_CAPACITY: usize = 256;

/// Greeting above the first prompt.
const CAPTION: &str = "Enter a URL to get a summary of the website's content.";
const EMPTY_INPUT_NOTICE: &str = "Please enter a URL.";

pub enum TuiMsg {
    InputEvent(CtEvent),
    Tick,
    Submit(String),
    SummaryDone(String),
    SummaryFailed(PipelineError),
    OpError(String),
    Shutdown,
}

/// Owns the terminal and all UI state. Messages arrive over the mailbox
/// from the input/tick feeders and from finished pipeline tasks.
pub struct TuiApp {
    pipeline: Arc<Pipeline>,

    // terminal
    term: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,

    // ui state
    input: InputLine,
    lines: Vec<TranscriptLine>, // transcript buffer
    scroll: usize,              // from bottom
    dirty: bool,

    // busy/spinner
    busy: u32,
    spin_idx: usize,

    // mailbox handle for self-sends and worker completions
    tx: mpsc::Sender<TuiMsg>,

    // shutdown coordination
    shutdown: ShutdownHandle,
    stopping: bool,
}

/// Drive the whole UI: terminal setup, feeder tasks, message loop. Returns
/// once the user quits or the input side goes away.
pub async fn run(pipeline: Pipeline, shutdown: ShutdownHandle) -> Result<()> {
    let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
    let app = TuiApp::new(pipeline, tx.clone(), shutdown.clone())?;
    crate::feeders::spawn_tui_feeders(tx, shutdown);
    run_loop(app, rx).await
}

async fn run_loop(mut app: TuiApp, mut rx: mpsc::Receiver<TuiMsg>) -> Result<()> {
    let mut shutdown_rx = app.shutdown.subscribe();
    let outcome = loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break Ok(()),
            maybe_msg = rx.recv() => match maybe_msg {
                Some(msg) => {
                    if let Err(e) = app.handle(msg) {
                        break Err(e);
                    }
                    if app.stopping {
                        break Ok(());
                    }
                }
                None => break Ok(()),
            },
        }
    };
    // Leave the terminal usable on every exit path, including draw errors.
    app.restore_terminal();
    outcome
}

impl TuiApp {
    pub fn new(
        pipeline: Pipeline,
        tx: mpsc::Sender<TuiMsg>,
        shutdown: ShutdownHandle,
    ) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        Ok(Self {
            pipeline: Arc::new(pipeline),
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
            input: InputLine::new(),
            lines: vec![
                TranscriptLine::new(CAPTION.into(), styles::system()),
                TranscriptLine::plain(String::new()),
            ],
            scroll: 0,
            dirty: true,
            busy: 0,
            spin_idx: 0,
            tx,
            shutdown,
            stopping: false,
        })
    }

    fn handle(&mut self, msg: TuiMsg) -> Result<()> {
        match msg {
            TuiMsg::InputEvent(ev) => {
                if let CtEvent::Key(k) = ev
                    && let Some(next) = self.handle_key(k)
                {
                    let _ = self.tx.try_send(next);
                }
            }
            TuiMsg::Submit(line) => self.on_submit(line),
            TuiMsg::SummaryDone(text) => {
                self.push_styled("← [Summary]", styles::heading());
                for line in markdown::render_markdown(&text) {
                    if line.text.is_empty() {
                        self.push_blank();
                    } else {
                        self.push_styled(format!("  {}", line.text), line.style);
                    }
                }
                self.push_blank();
                self.set_busy(false);
            }
            TuiMsg::SummaryFailed(err) => {
                let msg = match &err {
                    PipelineError::Fetch(e) => format!("Error fetching URL: {e}"),
                    PipelineError::Extract(e) => format!("Error fetching URL: {e}"),
                    PipelineError::Summary(e) => format!("Error generating summary: {e}"),
                };
                self.push_styled(msg, styles::error());
                self.push_blank();
                self.set_busy(false);
            }
            TuiMsg::OpError(e) => {
                self.push_styled(format!("× Error: {e}"), styles::error());
                self.push_blank();
            }
            TuiMsg::Tick => {
                self.step_spinner();
                if self.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.dirty = false;
                }
            }
            TuiMsg::Shutdown => {
                self.shutdown.signal();
                self.stopping = true;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<TuiMsg> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(TuiMsg::Shutdown),
            (KeyCode::PageUp, _) => {
                self.scroll = self.scroll.saturating_add(5);
                self.dirty = true;
            }
            (KeyCode::PageDown, _) => {
                self.scroll = self.scroll.saturating_sub(5);
                self.dirty = true;
            }
            (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_add(1);
                self.dirty = true;
            }
            (KeyCode::Down, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                self.dirty = true;
            }
            (KeyCode::Enter, _) => {
                let line = self.input.take();
                self.dirty = true;
                return Some(TuiMsg::Submit(line));
            }
            (KeyCode::Left, _) => {
                self.input.left();
                self.dirty = true;
            }
            (KeyCode::Right, _) => {
                self.input.right();
                self.dirty = true;
            }
            (KeyCode::Home, _) => {
                self.input.home();
                self.dirty = true;
            }
            (KeyCode::End, _) => {
                self.input.end();
                self.dirty = true;
            }
            (KeyCode::Backspace, _) => {
                self.input.backspace();
                self.dirty = true;
            }
            (KeyCode::Delete, _) => {
                self.input.delete();
                self.dirty = true;
            }
            (KeyCode::Esc, _) => {
                self.input.clear();
                self.dirty = true;
            }
            (KeyCode::Char(ch), _) => {
                self.input.insert(ch);
                self.dirty = true;
            }
            _ => {}
        }
        None
    }

    fn on_submit(&mut self, line: String) {
        match classify_submission(&line) {
            Submission::Empty => {
                self.push_styled(EMPTY_INPUT_NOTICE, styles::error());
                self.push_blank();
            }
            Submission::Command(cmd) => self.handle_command(cmd),
            Submission::Url(url) => self.start_summary(url),
        }
    }

    fn start_summary(&mut self, url: String) {
        // One run at a time; the status bar already says we are busy.
        if self.busy > 0 {
            tracing::debug!(%url, "tui.submit.ignored_while_busy");
            return;
        }
        tracing::info!(%url, "tui.submit");

        self.push_styled("→ [You]", styles::user_header());
        self.push_styled(format!("  {url}"), styles::user_text());
        self.push_blank();
        self.set_busy(true);

        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match pipeline.summarize_url(&url).await {
                Ok(summary) => {
                    let _ = tx.send(TuiMsg::SummaryDone(summary)).await;
                }
                Err(e) => {
                    let _ = tx.send(TuiMsg::SummaryFailed(e)).await;
                }
            }
        });
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => {
                let _ = self.tx.try_send(TuiMsg::Shutdown);
            }
            Command::Help => {
                self.push_styled("Commands:", styles::label());
                self.push_styled("  <url>    summarize that page", styles::value());
                self.push_styled("  /help    this list", styles::value());
                self.push_styled("  /quit    exit (also Ctrl-C / Ctrl-Q)", styles::value());
                self.push_blank();
            }
            Command::Unknown(s) => {
                self.push_styled(format!("× Unknown command: {s}"), styles::error());
                self.push_styled("Try `/help`.", styles::dim());
                self.push_blank();
            }
        }
    }

    fn push_styled<S: Into<String>>(&mut self, s: S, style: Style) {
        self.lines.push(TranscriptLine::new(s.into(), style));
        self.dirty = true;
    }

    fn push_blank(&mut self) {
        self.push_styled(String::new(), Style::default());
    }

    fn spinner(&self) -> &'static str {
        if self.busy > 0 {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn set_busy(&mut self, on: bool) {
        if on {
            self.busy = self.busy.saturating_add(1)
        } else {
            self.busy = self.busy.saturating_sub(1)
        }
        self.dirty = true;
    }

    fn step_spinner(&mut self) {
        if self.busy > 0 {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let snap = ViewSnap::new(
            self.input.as_str().to_string(),
            self.input.cursor(),
            self.lines.clone(),
            self.scroll,
            self.busy,
            self.spinner(),
        );

        view::draw(&mut self.term, &snap)
    }

    fn restore_terminal(&mut self) {
        disable_raw_mode().ok();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}
