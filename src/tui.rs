//! # Text-based user interface (TUI)
//!
//! Terminal setup and teardown for the interactive board editor. The terminal
//! must be returned to cooked mode and the main screen however the editor
//! ends, including by panic, or the user's shell is left unusable.

use std::{
	io::{self, stdout, Stdout},
	panic,
	sync::{Arc, Mutex},
	thread
};

use crossterm::{
	execute,
	terminal::{
		disable_raw_mode, enable_raw_mode,
		EnterAlternateScreen, LeaveAlternateScreen
	}
};
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};

////////////////////////////////////////////////////////////////////////////////
//                         Text-based user interface.                         //
////////////////////////////////////////////////////////////////////////////////

/// The text-based user interface (TUI) type.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Drive the terminal with the given function. The terminal is switched to
/// the alternate screen in raw mode beforehand, and restored afterward, even
/// if `f` fails. A panic on the calling thread also restores the terminal,
/// before the previous panic hook reports it.
///
/// # Arguments
///
/// * `f` - The function to apply to the TUI.
///
/// # Returns
///
/// The result of applying `f` to the TUI.
///
/// # Errors
///
/// Any error that occurs while setting up, driving, or restoring the terminal.
pub fn tui<F, T>(f: F) -> io::Result<T>
	where F: FnOnce(&mut Tui) -> io::Result<T>
{
	// The previous hook is shared with the replacement hook, which may run on
	// any thread, and is reinstated once `f` returns.
	let previous = Arc::new(Mutex::new(Some(panic::take_hook())));
	let shared = Arc::clone(&previous);
	let ui_thread = thread::current().id();
	panic::set_hook(Box::new(move |info| {
		if thread::current().id() == ui_thread
		{
			let _ = restore();
		}
		if let Ok(guard) = shared.lock()
		{
			if let Some(hook) = guard.as_ref()
			{
				hook(info);
			}
		}
	}));
	// Setup can fail halfway, so restore unconditionally.
	let result = setup().and_then(|mut terminal| f(&mut terminal));
	let hook = previous.lock()
		.map(|mut guard| guard.take())
		.unwrap_or_else(|poisoned| poisoned.into_inner().take());
	if let Some(hook) = hook
	{
		panic::set_hook(hook);
	}
	restore()?;
	result
}

/// Enter the alternate screen and raw mode.
fn setup() -> io::Result<Tui>
{
	let mut stdout = stdout();
	execute!(stdout, EnterAlternateScreen)?;
	enable_raw_mode()?;
	Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave raw mode and the alternate screen, and show the cursor again.
fn restore() -> io::Result<()>
{
	let mut stdout = stdout();
	execute!(stdout, LeaveAlternateScreen)?;
	disable_raw_mode()?;
	CrosstermBackend::new(stdout).show_cursor()
}
