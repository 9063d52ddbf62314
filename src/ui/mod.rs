pub mod game_common;
pub mod menu_scene;
pub mod play_scene;
pub mod settings_scene;
pub mod slider_widget;

use crate::game::{Scene, Session};
use menu_scene::MenuScreen;
use ratatui::Frame;
use settings_scene::SettingsScreen;
use slider_widget::VerticalSlider;

/// Per-screen UI state that lives outside the simulation.
pub struct Screens {
    pub menu: MenuScreen,
    pub settings: SettingsScreen,
    pub slider: VerticalSlider,
}

/// Draw whatever the session's current scene calls for.
pub fn draw(frame: &mut Frame, session: &Session, screens: &mut Screens) {
    let area = frame.size();
    match session.scene() {
        Scene::Menu => screens.menu.render(frame, area),
        Scene::Settings => screens.settings.render(frame, area),
        Scene::AdvancedSettings => screens.settings.render_advanced(frame, area),
        Scene::Playing | Scene::Dead => play_scene::render_play(
            frame,
            area,
            &session.frame(),
            session.settings(),
            session.input(),
            &mut screens.slider,
        ),
    }
}
