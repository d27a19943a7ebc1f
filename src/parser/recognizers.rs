//! Hand-written state machines that recognize a construct at the start of a
//! string. Each returns the matched prefix or `None`; none of them allocate.

mod autolink;
mod html_inline;
mod table_delimiter;

pub use autolink::{match_autolink, match_email};
pub use html_inline::match_html;
pub use table_delimiter::is_delimiter_row;
