//! ASCII art tables: pure data, no logic.
//!
//! Every sprite is a slice of rows; a space character is a transparent
//! (unoccupied) cell.  Sprite dimensions are derived from the widest row
//! and the row count, so rows may be ragged.

/// Ship art, one variant per damage state.  `Ship::max_hits` is derived
/// from the length of this table: index 0 is pristine, the last index is
/// the wreck shown one hit before destruction.
pub const SHIP_STATES: &[&[&str]] = &[
    &[
        r"   __       ",
        r"   \ \_____ ",
        r"###[==_____>",
        r"   /_/      ",
    ],
    &[
        r"   __       ",
        r"   \ \_____ ",
        r"## [==_____>",
        r"   /_/      ",
    ],
    &[
        r"   __       ",
        r"   \ \__-__ ",
        r"#  [==_ ___>",
        r"   /_/      ",
    ],
    &[
        r"    _       ",
        r"   \ \_ -__ ",
        r"   [=_ _ __>",
        r"   / /      ",
    ],
];

pub const METEOR: &[&str] = &[
    r" .-. ",
    r"(   )",
    r" `-' ",
];

pub const MOON: &[&str] = &[
    r"   _..    ",
    r" '`-. `.  ",
    r"     \  \ ",
    r"     |  | ",
    r"     /  / ",
    r" _.-`_.`  ",
    r"  '''     ",
];

/// Four rotation frames, selected by the asteroid's phase counter.
pub const ASTEROID_FRAMES: &[&[&str]] = &[
    &[
        r" /\_ ",
        r"<   >",
        r" \_/ ",
    ],
    &[
        r" _/\ ",
        r"<   >",
        r" \/_ ",
    ],
    &[
        r" /\_ ",
        r">   <",
        r" \_/ ",
    ],
    &[
        r" _/\ ",
        r">   <",
        r" \/_ ",
    ],
];

pub const RECORD: &[&str] = &[
    r" .--. ",
    r"( () )",
    r" `--' ",
];

pub const BLACK_HOLE: &[&str] = &[
    r"  ,-.  ",
    r" ( @ ) ",
    r"  `-'  ",
];

/// A drifting distress call, advanced on the slow message tick.
pub const SIGNAL: &[&str] = &[
    r"... --- ...",
];

/// One tile of the scrolling starfield.  The renderer repeats it across
/// the viewport, offset horizontally by the scroll position.
pub const BACKGROUND: &[&str] = &[
    r"  .          *        .       .          .     ",
    r"       .          .        +       .           ",
    r" .          +          .        .       *      ",
    r"     *          .    .      .        .         ",
    r"  .       .        .     *      .         .    ",
    r"       .      *         .          .        +  ",
];
