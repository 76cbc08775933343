use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HEADER_HEIGHT, MessageList};

/// Header on top, conversation in the middle, draft editor at the bottom.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let palette = tui.header.palette;
    frame.render_widget(Block::default().style(palette.base), frame.area());

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let [header_area, list_area, input_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(input_height),
    ])
    .areas(frame.area());

    tui.header.render(frame, header_area);

    MessageList {
        state: &mut tui.message_list,
        messages: app.messages(),
        awaiting_response: app.awaiting_response,
        palette,
        disclaimer_threshold: tui.disclaimer_threshold,
        frame_index: tui.frame_index,
    }
    .render(frame, list_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::message::APOLOGY;
    use crate::test_support::app_with_exchange;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        tui.sync(app);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn fresh_screen_shows_header_welcome_and_placeholder() {
        let app = App::new();
        let mut tui = TuiState::new(&app, 100);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Medical Assistant"));
        assert!(text.contains("Always here to help"));
        assert!(text.contains("Welcome to Your Medical Assistant"));
        assert!(text.contains("Type your medical question here..."));
    }

    #[test]
    fn pending_request_shows_typing_and_disables_input() {
        let mut app = App::new();
        update(&mut app, Action::Submit("Is ibuprofen safe?".into()));
        let mut tui = TuiState::new(&app, 100);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Is ibuprofen safe?"));
        assert!(text.contains("typing"));
        assert!(tui.input_box.disabled);
        assert!(!text.contains("Welcome to Your Medical Assistant"));
    }

    #[test]
    fn failure_renders_apology_and_reenables_input() {
        let mut app = App::new();
        update(&mut app, Action::Submit("hello".into()));
        update(&mut app, Action::RequestFailed("timeout".into()));
        let mut tui = TuiState::new(&app, 100);
        let text = draw(&app, &mut tui);
        assert!(text.contains(&APOLOGY[..16]));
        assert!(!text.contains("typing"));
        assert!(!tui.input_box.disabled);
    }

    #[test]
    fn theme_toggle_updates_header_label() {
        let mut app = app_with_exchange();
        let mut tui = TuiState::new(&app, 100);
        assert!(draw(&app, &mut tui).contains("Dark mode"));

        update(&mut app, Action::ToggleTheme);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Light mode"));
        assert!(text.contains("What is a fever?"));
    }
}
