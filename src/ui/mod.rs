/// User interface module
///
/// - `photo_list.rs` - the photo grid with favorite toggles and hover feedback
/// - `controls.rs` - category/sort pickers, pagination bar and status line

pub mod controls;
pub mod photo_list;
