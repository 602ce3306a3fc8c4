use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use typed_builder::TypedBuilder;

pub trait App {
    fn init(&mut self);
    /// Render the current state into `frame`, then advance.
    fn update(&mut self, frame: &mut String);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn title(&self) -> String;
}

#[derive(TypedBuilder)]
pub struct TermInitInfo {
    pub title: String,
    #[builder(default = Duration::from_millis(100))]
    pub delay: Duration,
    /// Stop after this many frames; run until the app exits when `None`.
    #[builder(default)]
    pub max_frames: Option<u64>,
    /// Clear the screen before every frame.
    #[builder(default = true)]
    pub clear: bool,
}

pub struct TermContext;

impl TermContext {
    pub fn run(init_info: TermInitInfo, app: impl App) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        Self::run_with(init_info, app, &mut out)
    }

    pub fn run_with<W: Write>(init_info: TermInitInfo, mut app: impl App, out: &mut W) -> Result<()> {
        let TermInitInfo {
            title,
            delay,
            max_frames,
            clear,
        } = init_info;

        let mut frame = String::new();
        let mut frames = 0u64;
        app.init();
        loop {
            if app.should_exit() || max_frames.is_some_and(|max| frames >= max) {
                app.exit();
                break;
            }

            frame.clear();
            app.update(&mut frame);

            if clear {
                write!(out, "\x1b[2J\x1b[H")?;
            }
            writeln!(out, "{}", title)?;
            out.write_all(frame.as_bytes())?;
            out.flush()?;

            frames += 1;
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
        log::debug!("{} frames rendered", frames);

        Ok(())
    }
}
