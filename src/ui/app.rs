use crate::ai::RolloutAgent;
use crate::game::{column_index, BoardLayout, GameOutcome, GameState, MoveError, Player};
use crate::session::GameMode;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// The human always plays O against the rollout AI playing X.
const HUMAN: Player = Player::O;

/// Terminal Human-vs-AI game.
pub struct App {
    layout: BoardLayout,
    mode: GameMode,
    game_state: GameState,
    agent: RolloutAgent,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(layout: BoardLayout, agent: RolloutAgent, human_first: bool) -> Self {
        let mode = GameMode::HumanVsAi { human_first };
        let game_state = GameState::new(&layout, mode.first_player());
        let mut app = App {
            selected_column: layout.cols() / 2, // Start in middle
            layout,
            mode,
            game_state,
            agent,
            should_quit: false,
            message: None,
        };
        app.ai_move_if_due();
        app
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.layout.cols() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c) => {
                if let Some(col) = column_index(c).filter(|&col| col < self.layout.cols()) {
                    self.selected_column = col;
                    self.drop_piece();
                }
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.game_state = GameState::new(&self.layout, self.mode.first_player());
        self.selected_column = self.layout.cols() / 2;
        self.message = Some("New game started!".to_string());
        self.ai_move_if_due();
    }

    /// Drop the human's piece in the selected column, then let the AI reply.
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column) {
            Ok(_) => {
                if !self.report_outcome() {
                    self.ai_move_if_due();
                }
            }
            Err(MoveError::ColumnFull) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    fn ai_move_if_due(&mut self) {
        if self.game_state.is_terminal() || self.game_state.current_player() == HUMAN {
            return;
        }
        let result = self
            .agent
            .select_column(&self.game_state)
            .map_err(|e| e.to_string())
            .and_then(|col| {
                self.game_state
                    .apply_move_mut(col)
                    .map_err(|e| format!("AI chose column {col}: {e}"))
            });
        match result {
            Ok(_) => {
                self.report_outcome();
            }
            Err(e) => self.message = Some(e),
        }
    }

    /// Set the end-of-game message; true if the game is over.
    fn report_outcome(&mut self) -> bool {
        match self.game_state.outcome() {
            Some(GameOutcome::Winner(player)) if player == HUMAN => {
                self.message = Some("You win!".to_string());
                true
            }
            Some(GameOutcome::Winner(_)) => {
                self.message = Some("The AI wins!".to_string());
                true
            }
            Some(GameOutcome::Draw) => {
                self.message = Some("It's a draw!".to_string());
                true
            }
            None => false,
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let mode = format!("Human vs {}", self.agent_label());
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            &mode,
        );
    }

    fn agent_label(&self) -> String {
        format!("AI ({} simulations)", self.agent.simulations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(human_first: bool) -> App {
        let layout = BoardLayout::parse("7 8 6 7 8 9 8", "A3 B1").unwrap();
        App::new(layout, RolloutAgent::with_seed(80, 3), human_first)
    }

    #[test]
    fn test_ai_opens_when_human_is_second() {
        let app = app(false);
        assert_eq!(app.game_state().move_count(), 1);
        assert_eq!(app.game_state().current_player(), HUMAN);
    }

    #[test]
    fn test_human_move_gets_ai_reply() {
        let mut app = app(true);
        assert_eq!(app.game_state().move_count(), 0);
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.game_state().move_count(), 2);
        assert_eq!(app.game_state().current_player(), HUMAN);
    }

    #[test]
    fn test_selection_stays_on_board() {
        let mut app = app(true);
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.selected_column, 6);
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Left));
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_restart_and_quit() {
        let mut app = app(true);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.game_state().move_count(), 0);
        assert_eq!(app.message.as_deref(), Some("New game started!"));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
