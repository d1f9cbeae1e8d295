/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move cursor up
    MoveUp,
    /// Move cursor down
    MoveDown,
    /// Move cursor up by a page
    PageUp,
    /// Move cursor down by a page
    PageDown,
    /// Go to first item
    GoToFirst,
    /// Go to last item
    GoToLast,
    /// Focus the next panel
    NextPanel,
    /// Focus the previous panel
    PrevPanel,
    /// Mark/unmark the item under the cursor and move down
    ToggleSelect,
    /// Mark every visible item in the focused panel
    SelectAll,
    /// Unmark everything in the focused panel
    DeselectAll,
    /// Unmark everything in every panel
    ClearSelection,
    /// Request batch delete (show confirmation dialog)
    DeleteSelected,
    /// Confirm batch delete
    ConfirmDelete,
    /// Cancel batch delete
    CancelDelete,
    /// Start typing a filter for the focused panel
    StartFilter,
    /// Append a character to the filter
    FilterInput(char),
    /// Remove the last filter character
    FilterBackspace,
    /// Keep the filter and return to the list
    ApplyFilter,
    /// Drop the filter of the focused panel
    ClearFilter,
    /// Reload resources from docker
    Refresh,
    /// Show help overlay
    ShowHelp,
    /// Hide help overlay
    HideHelp,
    /// Close the error panel
    DismissError,
    /// Quit the application
    Quit,
    /// No action (for tick events)
    Tick,
}
