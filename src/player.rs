use crate::record::record;

record! {
    /// A participant. `id` is expected to be unique, but nothing here checks it.
    pub struct Player {
        pub id: i64,
        pub name: String,
        pub info: String,
    }
}

record! {
    /// A [`Player`] that may be part of an externally managed selection.
    ///
    /// Derefs to its `Player`, and its record form is the player's record with
    /// a `selected` key added.
    pub struct SelectablePlayer extends Player as player {
        pub selected: bool,
    }
}

impl Player {
    pub fn new(id: i64, name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            info: info.into(),
        }
    }

    pub fn with_selection(self, selected: bool) -> SelectablePlayer {
        SelectablePlayer::new(self, selected)
    }
}

impl SelectablePlayer {
    pub fn new(player: Player, selected: bool) -> Self {
        Self { player, selected }
    }

    pub fn into_player(self) -> Player {
        self.player
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn toggle(&mut self) {
        self.selected = !self.selected;
    }
}
