//! # Application
//!
//! The application state and logic, including the text-based user interface
//! (TUI).

use std::io;

use boggle_solver::{
	board::{random_glyphs, Board, BoardError},
	glyph::Glyph,
	path::SearchPath,
	solver::Solver,
	sort::{ranked_words, sort_paths, SortOrder}
};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{
	buffer::Buffer,
	layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Color, Style, Stylize},
	text::Line,
	widgets::{
		Block, BorderType, Borders, List, ListState, Paragraph,
		StatefulWidget, Widget
	},
	Frame
};

use crate::tui::Tui;

////////////////////////////////////////////////////////////////////////////////
//                                Application.                                //
////////////////////////////////////////////////////////////////////////////////

/// The application state.
#[must_use]
pub struct App
{
	/// Whether the application is running, and what it is showing.
	state: ExecutionState,

	/// The solver, which owns the dictionary.
	solver: Solver,

	/// The number of columns of the grid.
	width: usize,

	/// The number of rows of the grid.
	height: usize,

	/// The coordinates of the cursor. The first element is X, which
	/// corresponds to the column, and the second element is Y, which
	/// corresponds to the row. The origin is the top-left corner.
	cursor: (usize, usize),

	/// The content of the grid, linearized in row-major order. Empty cells
	/// are `None`.
	cells: Vec<Option<Glyph>>,

	/// How to rank the solution.
	order: SortOrder
}

// Public interface.
impl App
{
	/// Create a new application state, with an empty grid.
	///
	/// # Arguments
	///
	/// * `solver` - The solver to use for solving the board.
	/// * `width` - The number of columns of the grid.
	/// * `height` - The number of rows of the grid.
	///
	/// # Errors
	///
	/// [`BoardError::EmptyBoard`] if either dimension is zero.
	pub fn new(
		solver: Solver,
		width: usize,
		height: usize
	) -> Result<Self, BoardError>
	{
		if width == 0 || height == 0
		{
			return Err(BoardError::EmptyBoard { width, height })
		}
		Ok(Self {
			state: ExecutionState::Populating,
			solver,
			width,
			height,
			cursor: (0, 0),
			cells: vec![None; width * height],
			order: SortOrder::default()
		})
	}

	/// Run the application until the user exits, alternately rendering the
	/// application frame and processing an event.
	///
	/// # Arguments
	///
	/// * `tui` - The text-based user interface (TUI).
	///
	/// # Returns
	///
	/// The distinct words of the solution, ranked, or nothing if the user
	/// exits before solving.
	///
	/// # Errors
	///
	/// Any error that occurs while running the application.
	pub fn run(mut self, tui: &mut Tui) -> io::Result<Vec<String>>
	{
		while self.is_running()
		{
			tui.draw(|frame| self.render_frame(frame))?;
			self.process_event()?;
		}
		match self.state
		{
			ExecutionState::Exiting { solution } => Ok(solution),
			_ => Ok(vec![])
		}
	}

	/// Check if the application is running.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool
	{
		!matches!(self.state, ExecutionState::Exiting { .. })
	}
}

// Private implementation details.
impl App
{
	/// Move the cursor by the given deltas. Moves that would leave the grid
	/// are ignored.
	fn move_cursor(&mut self, dx: isize, dy: isize)
	{
		let x = self.cursor.0.checked_add_signed(dx);
		let y = self.cursor.1.checked_add_signed(dy);
		if let (Some(x), Some(y)) = (x, y)
		{
			if x < self.width && y < self.height
			{
				self.cursor = (x, y);
			}
		}
	}

	/// Move the cursor by the given number of cells in row-major order,
	/// wrapping between rows but not past either end of the grid. This
	/// supports tabbing through the cells.
	fn move_index(&mut self, di: isize)
	{
		if let Some(index) = self.current_index().checked_add_signed(di)
		{
			if index < self.cells.len()
			{
				self.cursor = (index % self.width, index / self.width);
			}
		}
	}

	/// Get the row-major index of the current cell.
	#[inline]
	#[must_use]
	fn current_index(&self) -> usize
	{
		self.cursor.1 * self.width + self.cursor.0
	}

	/// Set the current cell from a letter, then advance to the next cell.
	fn set(&mut self, letter: char)
	{
		if let Some(glyph) = Glyph::from_letter(letter)
		{
			let index = self.current_index();
			self.cells[index] = Some(glyph);
			self.move_index(1);
		}
	}

	/// Clear the content of the current cell.
	fn clear(&mut self)
	{
		let index = self.current_index();
		self.cells[index] = None;
	}

	/// Clear the contents of all cells.
	fn clear_all(&mut self)
	{
		self.cells.iter_mut().for_each(|cell| *cell = None);
	}

	/// Fill every cell with a random glyph.
	fn randomize(&mut self)
	{
		if let Ok(rows) = random_glyphs(self.width, self.height, &mut rand::rng())
		{
			self.cells = rows.into_iter().flatten().map(Some).collect();
		}
	}

	/// Solve the board, if every cell is filled. Otherwise do nothing; the UI
	/// already marks the empty cells.
	fn solve(&mut self)
	{
		let Some(glyphs) = self.cells.iter().copied().collect::<Option<Vec<_>>>()
		else {
			return
		};
		let rows = glyphs.chunks(self.width).map(<[Glyph]>::to_vec).collect();
		let board = match Board::from_glyphs(rows)
		{
			Ok(board) => board,
			Err(e) =>
			{
				debug!("Refusing to solve: {}", e);
				return
			}
		};
		self.solver.solve(&board);
		let mut solution = board.solutions();
		sort_paths(&mut solution, self.order);
		self.state = ExecutionState::Finished { solution, highlight: None };
	}

	/// Move the highlight through the solution. If nothing is highlighted,
	/// use the sign of the change to determine which end of the solution to
	/// start from, i.e., positive for the beginning and negative for the end.
	/// Moving past either end removes the highlight.
	fn move_highlight(&mut self, di: isize)
	{
		if let ExecutionState::Finished { ref solution, ref mut highlight, .. } =
			self.state
		{
			let len = solution.len();
			*highlight = match *highlight
			{
				Some(index) => index.checked_add_signed(di)
					.filter(|&index| index < len),
				None if len == 0 => None,
				None if di > 0 => Some(0),
				None => Some(len - 1)
			};
		}
	}

	/// Toggle the sort order, keeping the same solution highlighted.
	fn toggle_order(&mut self)
	{
		self.order = self.order.toggle();
		let order = self.order;
		if let ExecutionState::Finished { ref mut solution, ref mut highlight, .. } =
			self.state
		{
			let selected = highlight.map(|index| solution[index].clone());
			sort_paths(solution, order);
			*highlight = selected
				.and_then(|path| solution.iter().position(|p| *p == path));
		}
	}

	/// Return to editing the board, keeping its contents.
	fn edit(&mut self)
	{
		self.state = ExecutionState::Populating;
	}

	/// Mark the application for exit. The application will exit after the next
	/// iteration of the main loop.
	fn exit(&mut self)
	{
		let solution = match self.state
		{
			ExecutionState::Finished { ref solution, .. } =>
				ranked_words(solution, self.order),
			ExecutionState::Exiting { ref solution } => solution.clone(),
			ExecutionState::Populating => vec![]
		};
		self.state = ExecutionState::Exiting { solution };
	}

	/// Process the next event, blocking until one arrives.
	///
	/// # Errors
	///
	/// Any error that occurs while reading events.
	fn process_event(&mut self) -> io::Result<()>
	{
		match read()?
		{
			Event::Key(event) if event.kind == KeyEventKind::Press =>
				self.process_key_event(event),
			_ => {}
		}
		Ok(())
	}

	/// Process a key event according to the current state.
	fn process_key_event(&mut self, event: KeyEvent)
	{
		match self.state
		{
			ExecutionState::Populating =>
				self.process_key_event_populating(event),
			ExecutionState::Finished { .. } =>
				self.process_key_event_finished(event),
			ExecutionState::Exiting { .. } => {}
		}
	}

	/// Process a key event while [populating](ExecutionState::Populating) the
	/// board:
	///
	/// * Escape - Exit the application.
	/// * Up, Down, Left, Right - Move the cursor.
	/// * Tab, BackTab - Move the cursor to the next or previous cell.
	/// * Backspace, Delete - Clear the current cell.
	/// * Shift+Delete - Clear every cell.
	/// * Ctrl+R - Fill every cell at random.
	/// * Enter - Solve the board.
	/// * A-Z - Set the current cell, then advance. `Q` yields `Qu`.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_populating(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.exit(),
			KeyCode::Up => self.move_cursor(0, -1),
			KeyCode::Down => self.move_cursor(0, 1),
			KeyCode::Left => self.move_cursor(-1, 0),
			KeyCode::Right => self.move_cursor(1, 0),
			KeyCode::BackTab => self.move_index(-1),
			KeyCode::Tab => self.move_index(1),
			KeyCode::Delete if event.modifiers.contains(KeyModifiers::SHIFT) =>
				self.clear_all(),
			KeyCode::Backspace | KeyCode::Delete => self.clear(),
			KeyCode::Enter => self.solve(),
			KeyCode::Char('r') | KeyCode::Char('R')
				if event.modifiers.contains(KeyModifiers::CONTROL) =>
				self.randomize(),
			KeyCode::Char(c) if c.is_ascii_alphabetic() => self.set(c),
			_ => {}
		}
	}

	/// Process a key event while [reviewing](ExecutionState::Finished) the
	/// solution:
	///
	/// * Escape - Exit the application.
	/// * Up, Down - Move the highlight.
	/// * S - Toggle the sort order.
	/// * E - Return to editing the board.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_finished(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.exit(),
			KeyCode::Up => self.move_highlight(-1),
			KeyCode::Down => self.move_highlight(1),
			KeyCode::Char('s') | KeyCode::Char('S') => self.toggle_order(),
			KeyCode::Char('e') | KeyCode::Char('E') => self.edit(),
			_ => {}
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Rendering.                                 //
////////////////////////////////////////////////////////////////////////////////

impl App
{
	/// Render the application frame.
	fn render_frame(&self, frame: &mut Frame)
	{
		frame.render_widget(self, frame.area());
	}

	/// Split the area into the board and the solution list, drawing the
	/// board's frame along the way.
	///
	/// # Returns
	///
	/// The rows of the grid, top to bottom, and the area of the solution list.
	fn layout(&self, area: Rect, buf: &mut Buffer, help: &str)
		-> (Vec<Rect>, Rect)
	{
		let outer = Layout::default()
			.direction(Direction::Horizontal)
			.margin(1)
			.constraints([Constraint::Percentage(100), Constraint::Min(24)])
			.split(area);
		let mut constraints = vec![Constraint::Ratio(1, 2)];
		constraints.extend((0 .. self.height).map(|_| Constraint::Length(3)));
		constraints.push(Constraint::Ratio(1, 2));
		let rows = Layout::default()
			.direction(Direction::Vertical)
			.margin(2)
			.constraints(constraints)
			.split(outer[0]);
		Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(Color::White))
			.title_top(Line::from("Board").centered())
			.title_top(Line::from("⎋ – exit".yellow().bold()).left_aligned())
			.title_bottom(Line::from(help.cyan()).centered())
			.render(outer[0], buf);
		(rows[1 ..= self.height].to_vec(), outer[1])
	}

	/// Render the grid. In the [populating](ExecutionState::Populating) state,
	/// the cursor is marked and empty cells are outlined in red. Otherwise, the
	/// highlighted path, if any, is numbered step by step.
	fn render_grid(
		&self,
		rows: &[Rect],
		buf: &mut Buffer,
		path: Option<&SearchPath>
	) {
		let populating = matches!(self.state, ExecutionState::Populating);
		for (y, row) in rows.iter().enumerate()
		{
			let columns = Layout::default()
				.direction(Direction::Horizontal)
				.constraints((0 .. self.width).map(|_| Constraint::Length(7)))
				.split(*row);
			for (x, area) in columns.iter().enumerate()
			{
				let index = y * self.width + x;
				let cell = self.cells[index];
				let text = cell.map(|g| g.to_string()).unwrap_or_default();
				let step = path.and_then(|p| {
					p.positions().iter().position(|pos| pos.x == x && pos.y == y)
				});
				let (label, style, border) = match step
				{
					Some(step) => (
						format!("{} {}", step + 1, text),
						Style::default().fg(Color::Black).bg(Color::Green),
						Color::Black
					),
					None if populating && index == self.current_index() => (
						text,
						Style::default().fg(Color::Black).bg(Color::Cyan),
						if cell.is_none() { Color::Red } else { Color::White }
					),
					None => (
						text,
						Style::default(),
						if cell.is_none() { Color::Red } else { Color::White }
					)
				};
				Paragraph::new(label)
					.block(
						Block::new()
							.border_type(BorderType::Rounded)
							.borders(Borders::ALL)
							.border_style(Style::default().fg(border))
					)
					.alignment(Alignment::Center)
					.style(style)
					.render(*area, buf);
			}
		}
	}

	/// Render the [populating](ExecutionState::Populating) UI.
	fn render_populating(&self, area: Rect, buf: &mut Buffer)
	{
		let (rows, side) = self.layout(
			area,
			buf,
			"←↑↓→ - move  ⇥ - next  ⇧⇥ - previous  A-Z - set  ⌫ - clear  \
				⇧⌦ - clear all  ^R - random  ↵ - solve"
		);
		self.render_grid(&rows, buf, None);
		Block::default()
			.title("Solution")
			.title_alignment(Alignment::Center)
			.borders(Borders::ALL)
			.render(side, buf);
	}

	/// Render the [finished](ExecutionState::Finished) UI.
	fn render_finished(
		&self,
		area: Rect,
		buf: &mut Buffer,
		solution: &[SearchPath],
		highlight: Option<usize>
	) {
		let (rows, side) = self.layout(
			area,
			buf,
			"↑↓ - select  s - sort  e - edit"
		);
		self.render_grid(&rows, buf, highlight.map(|index| &solution[index]));
		let mut list_state = ListState::default();
		list_state.select(highlight);
		let title = format!("Solution ({}, by {})", solution.len(), self.order);
		let list = List::new(solution.iter().map(ToString::to_string))
			.block(
				Block::default()
					.borders(Borders::ALL)
					.title_top(Line::from(title).centered())
			)
			.style(Style::default().fg(Color::White))
			.highlight_style(Style::default().fg(Color::Black).bg(Color::Green));
		StatefulWidget::render(&list, side, buf, &mut list_state);
	}
}

impl Widget for &App
{
	fn render(self, area: Rect, buf: &mut Buffer)
	{
		match self.state
		{
			ExecutionState::Populating => self.render_populating(area, buf),
			ExecutionState::Finished { ref solution, highlight } =>
				self.render_finished(area, buf, solution, highlight),
			ExecutionState::Exiting { .. } => {}
		}
	}
}

/// The execution state of the application.
#[derive(Debug)]
enum ExecutionState
{
	/// The user is populating the board.
	Populating,

	/// The board is solved, and the user is reviewing the solution.
	Finished {
		/// The solution paths, in the current sort order.
		solution: Vec<SearchPath>,

		/// The index of the highlighted solution, if any.
		highlight: Option<usize>
	},

	/// The application is exiting.
	Exiting {
		/// The distinct words of the solution, ranked.
		solution: Vec<String>
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
