//! Table delimiter row recognizer (`| :--- | ---: |`).

#[derive(Clone, Copy)]
enum State {
    Start,
    Pipe,
    LeadingColon,
    Dashes,
    TrailingColon,
    CellEnd,
    DashesThenSpace,
}

/// True if `s` is a delimiter row: cells made of dashes with optional
/// alignment colons, separated by pipes, with at least one dash overall.
pub fn is_delimiter_row(s: &str) -> bool {
    use State::*;

    let mut state = Start;
    let mut dashes = 0usize;
    for b in s.bytes() {
        state = match (state, b) {
            (Start, b'|') => Pipe,
            (Start | Pipe | CellEnd, b':') => LeadingColon,
            (Start | Pipe | LeadingColon | CellEnd, b'-') => {
                dashes += 1;
                Dashes
            }
            (Start | Pipe | LeadingColon | TrailingColon | CellEnd | DashesThenSpace, b' ') => {
                state
            }
            (Dashes, b'-') => Dashes,
            (Dashes | DashesThenSpace, b':') => TrailingColon,
            (Dashes | TrailingColon | DashesThenSpace, b'|') => CellEnd,
            (Dashes, b' ') => DashesThenSpace,
            _ => return false,
        };
    }
    dashes >= 1
}
