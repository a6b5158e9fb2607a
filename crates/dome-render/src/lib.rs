//! Presentation side of the dome engine: SVG wireframes, the text report and
//! the "current dome" state a front end keeps between parameter changes.

pub mod report;
pub mod svg;
pub mod view;

pub use report::format_report;
pub use svg::{dome_to_svg, project};
pub use view::{Completion, DomeView, Ticket};
