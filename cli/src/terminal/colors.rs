use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 129, g: 161, b: 193 };
pub const SEPARATOR: Color = Color::BrightBlack;

pub const ALIVE: Color = Color::Green;
pub const UNREACHABLE: Color = Color::Red;
pub const UNRESOLVABLE: Color = Color::Yellow;
