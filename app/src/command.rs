use eframe::egui::{Key, Modifiers};

use crate::ui::tab_viewer::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    // File Menu
    NewScene,
    OpenScene,
    SaveScene,
    ExportConfig,
    ImportConfig,
    Quit,

    // Edit Menu
    Preferences,

    // View Menu
    TogglePanel(Tab),
    ResetLayout,

    // Generator
    GenerateAll,
}

pub struct Command {
    pub id: CommandId,
    pub text: String,
    pub shortcut: Option<(Modifiers, Key)>,
    pub shortcut_text: String,
}

pub struct CommandRegistry {
    pub commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut commands = vec![
            // File Menu
            Command {
                id: CommandId::NewScene,
                text: "New Scene".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::N)),
                shortcut_text: "Ctrl+N".to_string(),
            },
            Command {
                id: CommandId::OpenScene,
                text: "Open Scene...".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::O)),
                shortcut_text: "Ctrl+O".to_string(),
            },
            Command {
                id: CommandId::SaveScene,
                text: "Save Scene...".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::S)),
                shortcut_text: "Ctrl+S".to_string(),
            },
            Command {
                id: CommandId::ExportConfig,
                text: "Export View Layer Config...".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::E)),
                shortcut_text: "Ctrl+E".to_string(),
            },
            Command {
                id: CommandId::ImportConfig,
                text: "Import View Layer Config...".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::I)),
                shortcut_text: "Ctrl+I".to_string(),
            },
            Command {
                id: CommandId::Quit,
                text: "Quit".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::Q)),
                shortcut_text: "Ctrl+Q".to_string(),
            },
            // Edit Menu
            Command {
                id: CommandId::Preferences,
                text: "Preferences...".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::Comma)),
                shortcut_text: "Ctrl+,".to_string(),
            },
            // View Menu
            Command {
                id: CommandId::ResetLayout,
                text: "Reset Layout".to_string(),
                shortcut: None,
                shortcut_text: String::new(),
            },
            Command {
                id: CommandId::GenerateAll,
                text: "Generate All".to_string(),
                shortcut: Some((Modifiers::COMMAND, Key::G)),
                shortcut_text: "Ctrl+G".to_string(),
            },
        ];
        for tab in Tab::all() {
            commands.push(Command {
                id: CommandId::TogglePanel(*tab),
                text: format!("{} Panel", tab.label()),
                shortcut: None,
                shortcut_text: String::new(),
            });
        }
        Self { commands }
    }

    pub fn find(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|cmd| cmd.id == id)
    }

    /// First command whose shortcut was pressed this frame.
    pub fn triggered(&self, ctx: &eframe::egui::Context) -> Option<CommandId> {
        self.commands.iter().find_map(|cmd| {
            let (modifiers, key) = cmd.shortcut?;
            ctx.input(|i| i.key_pressed(key) && i.modifiers == modifiers)
                .then_some(cmd.id)
        })
    }
}
