use crate::app::App;
use crate::input::InputAction;
use rouilleux_core::HumanAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::PurgePairs => app.enqueue(HumanAction::PurgePairs),
        InputAction::SortByRank => app.enqueue(HumanAction::SortByRank),
        InputAction::SortBySuit => app.enqueue(HumanAction::SortBySuit),
        InputAction::SortByColor => app.enqueue(HumanAction::SortByColor),
        InputAction::EndTurn => app.enqueue(HumanAction::EndTurn),
    }
}
