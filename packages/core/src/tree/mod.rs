//! Tree Reconciliation Engine
//!
//! Pure, synchronous algorithms over in-memory page trees:
//!
//! - [`index`] - pre-order id lookup and physical cycle detection
//! - [`placement`] - relative placement for the backend's move primitive
//! - [`plan`] - original vs draft diff into an ordered move plan
//! - [`validate`] - structural validation of any plan, including simulated cycles
//! - [`mutate`] - drag-and-drop edits on a deep copy
//!
//! None of these functions share state; each call owns or borrows its own trees.

pub mod index;
pub mod mutate;
pub mod placement;
pub mod plan;
pub mod validate;

pub use index::{build_node_index, find_duplicate_ids, has_cycle, walk_tree, IndexEntry, NodeIndex};
pub use mutate::{apply_drag_drop, DragDropRejection, DropPosition};
pub use placement::resolve_placement;
pub use plan::{compute_move_plan, order_plan};
pub use validate::{detect_simulated_cycles, validate_plan_against_tree};
