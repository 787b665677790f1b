//! Logical key identities for terminal keyboards.
//!
//! A [`Key`] is the layout-independent identity of a key: the same `Key`
//! is produced no matter which physical keyboard model (and therefore which
//! scan code) generated it.  Translating scan codes to keys is the job of a
//! [`Keymap`](super::keymap::Keymap); this module only defines the key set.
//!
//! # Stable integer identities
//!
//! Every key carries a fixed `u16` identity (its enum discriminant):
//!
//! | Range      | Meaning                                                     |
//! |------------|-------------------------------------------------------------|
//! | 0x00–0xFF  | A character key.  The identity *is* its Latin-1 code point. |
//! | 256–337    | Modifiers, cursor, program function, control, number pad.   |
//! | 401–409    | Extended control keys (PA1, PA2, field mark, …).            |
//!
//! Because character keys share their identity with their code point,
//! [`Key::to_char`] is a lossless conversion for them and returns `None` for
//! everything else.  [`Key::category`] answers the same question without
//! comparing numbers at the call site.

use serde::{Deserialize, Serialize};

/// A logical key on a terminal keyboard.
///
/// The numeric value of each variant is its stable identity.  Variants in the
/// character range are named after the symbol printed on the key cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum Key {
    // Modifiers
    LeftShift = 256,
    RightShift = 257,
    LeftAlt = 258,
    RightAlt = 259,
    CapsLock = 260,

    // Cursor movement
    Space = 0x20,
    Backspace = 261,
    Tab = 0x09,
    Backtab = 262,
    Newline = 263,
    Insert = 264,
    Delete = 265,
    Left = 266,
    Up = 267,
    Right = 268,
    Down = 269,
    RollUp = 270,
    RollDown = 271,
    Home = 272,
    Dup = 273,
    #[serde(rename = "BLANK_4")]
    Blank4 = 274,
    Jump = 275,
    Swap = 276,

    // Program function keys
    Pf1 = 277,
    Pf2 = 278,
    Pf3 = 279,
    Pf4 = 280,
    Pf5 = 281,
    Pf6 = 282,
    Pf7 = 283,
    Pf8 = 284,
    Pf9 = 285,
    Pf10 = 286,
    Pf11 = 287,
    Pf12 = 288,
    Pf13 = 289,
    Pf14 = 290,
    Pf15 = 291,
    Pf16 = 292,
    Pf17 = 293,
    Pf18 = 294,
    Pf19 = 295,
    Pf20 = 296,
    Pf21 = 297,
    Pf22 = 298,
    Pf23 = 299,
    Pf24 = 300,

    // Control
    Enter = 301,
    FieldExit = 302,
    Reset = 303,
    Quit = 304,
    SysRq = 305,
    Attn = 306,
    #[serde(rename = "BLANK_1")]
    Blank1 = 307,
    Clear = 308,
    #[serde(rename = "BLANK_2")]
    Blank2 = 309,
    EraseInput = 310,
    Print = 311,
    Help = 312,
    Hex = 313,
    #[serde(rename = "BLANK_3")]
    Blank3 = 314,
    Play = 315,
    Test = 316,
    SetUp = 317,
    Record = 318,
    Pause = 319,
    FieldMark = 401,
    CursorSelect = 402,
    CursorBlink = 403,
    EraseEof = 404,
    Volume = 405,
    AltCursor = 406,
    Ident = 407,
    Pa1 = 408,
    Pa2 = 409,

    // Number pad
    #[serde(rename = "NUMPAD_BLANK_1")]
    NumpadBlank1 = 320,
    #[serde(rename = "NUMPAD_BLANK_2")]
    NumpadBlank2 = 321,
    #[serde(rename = "NUMPAD_BLANK_3")]
    NumpadBlank3 = 322,
    #[serde(rename = "NUMPAD_BLANK_4")]
    NumpadBlank4 = 323,
    NumpadSeven = 324,
    NumpadEight = 325,
    NumpadNine = 326,
    NumpadFieldMinus = 327,
    NumpadFour = 328,
    NumpadFive = 329,
    NumpadSix = 330,
    #[serde(rename = "NUMPAD_BLANK_5")]
    NumpadBlank5 = 331,
    NumpadOne = 332,
    NumpadTwo = 333,
    NumpadThree = 334,
    NumpadFieldPlus = 335,
    NumpadZero = 336,
    NumpadPeriod = 337,

    // Latin: number row
    Backtick = 0x60, // '`'
    Tilde = 0x7E, // '~'
    One = 0x31, // '1'
    Bar = 0x7C, // '|'
    Two = 0x32, // '2'
    At = 0x40, // '@'
    Three = 0x33, // '3'
    Hash = 0x23, // '#'
    Four = 0x34, // '4'
    Dollar = 0x24, // '$'
    Five = 0x35, // '5'
    Percent = 0x25, // '%'
    Six = 0x36, // '6'
    Not = 0xAC, // '¬'
    Seven = 0x37, // '7'
    Ampersand = 0x26, // '&'
    Eight = 0x38, // '8'
    Asterisk = 0x2A, // '*'
    Nine = 0x39, // '9'
    LeftParen = 0x28, // '('
    Zero = 0x30, // '0'
    RightParen = 0x29, // ')'
    Minus = 0x2D, // '-'
    Underscore = 0x5F, // '_'
    Equal = 0x3D, // '='
    Plus = 0x2B, // '+'

    // Latin: upper row
    LowerQ = 0x71, // 'q'
    UpperQ = 0x51, // 'Q'
    LowerW = 0x77, // 'w'
    UpperW = 0x57, // 'W'
    LowerE = 0x65, // 'e'
    UpperE = 0x45, // 'E'
    LowerR = 0x72, // 'r'
    UpperR = 0x52, // 'R'
    LowerT = 0x74, // 't'
    UpperT = 0x54, // 'T'
    LowerY = 0x79, // 'y'
    UpperY = 0x59, // 'Y'
    LowerU = 0x75, // 'u'
    UpperU = 0x55, // 'U'
    LowerI = 0x69, // 'i'
    UpperI = 0x49, // 'I'
    LowerO = 0x6F, // 'o'
    UpperO = 0x4F, // 'O'
    LowerP = 0x70, // 'p'
    UpperP = 0x50, // 'P'
    Cent = 0xA2, // '¢'
    Exclamation = 0x21, // '!'
    Backslash = 0x5C, // '\\'
    BrokenBar = 0xA6, // '¦'
    LowerA = 0x61, // 'a'
    UpperA = 0x41, // 'A'
    LowerS = 0x73, // 's'
    UpperS = 0x53, // 'S'
    LowerD = 0x64, // 'd'
    UpperD = 0x44, // 'D'
    LowerF = 0x66, // 'f'
    UpperF = 0x46, // 'F'
    LowerG = 0x67, // 'g'
    UpperG = 0x47, // 'G'
    LowerH = 0x68, // 'h'
    UpperH = 0x48, // 'H'
    LowerJ = 0x6A, // 'j'
    UpperJ = 0x4A, // 'J'
    LowerK = 0x6B, // 'k'
    UpperK = 0x4B, // 'K'
    LowerL = 0x6C, // 'l'
    UpperL = 0x4C, // 'L'
    Semicolon = 0x3B, // ';'
    Colon = 0x3A, // ':'
    SingleQuote = 0x27, // "'"
    DoubleQuote = 0x22, // '"'
    LeftBrace = 0x7B, // '{'
    RightBrace = 0x7D, // '}'

    // Latin: bottom rows
    Less = 0x3C, // '<'
    Greater = 0x3E, // '>'
    LowerZ = 0x7A, // 'z'
    UpperZ = 0x5A, // 'Z'
    LowerX = 0x78, // 'x'
    UpperX = 0x58, // 'X'
    LowerC = 0x63, // 'c'
    UpperC = 0x43, // 'C'
    LowerV = 0x76, // 'v'
    UpperV = 0x56, // 'V'
    LowerB = 0x62, // 'b'
    UpperB = 0x42, // 'B'
    LowerN = 0x6E, // 'n'
    UpperN = 0x4E, // 'N'
    LowerM = 0x6D, // 'm'
    UpperM = 0x4D, // 'M'
    Comma = 0x2C, // ','
    Period = 0x2E, // '.'
    CenterPeriod = 0xB7, // '·'
    Slash = 0x2F, // '/'
    Question = 0x3F, // '?'
}

/// Broad grouping of keys, used to reason about a key without inspecting its
/// numeric identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Shift, Alt and Caps Lock.
    Modifier,
    /// Cursor movement and editing keys that have no character meaning.
    Cursor,
    /// PF1–PF24.
    Function,
    /// Enter, Reset, SysRq, PA keys and the other control keys.
    Control,
    /// Keys on the numeric pad (which report their own identities, not digits).
    NumberPad,
    /// Keys whose identity is a Latin-1 code point (includes Space and Tab).
    Character,
}

impl Key {
    /// Every key, in keyboard-row order.
    pub const ALL: &'static [Key] = &[
        Key::LeftShift,
        Key::RightShift,
        Key::LeftAlt,
        Key::RightAlt,
        Key::CapsLock,
        Key::Space,
        Key::Backspace,
        Key::Tab,
        Key::Backtab,
        Key::Newline,
        Key::Insert,
        Key::Delete,
        Key::Left,
        Key::Up,
        Key::Right,
        Key::Down,
        Key::RollUp,
        Key::RollDown,
        Key::Home,
        Key::Dup,
        Key::Blank4,
        Key::Jump,
        Key::Swap,
        Key::Pf1,
        Key::Pf2,
        Key::Pf3,
        Key::Pf4,
        Key::Pf5,
        Key::Pf6,
        Key::Pf7,
        Key::Pf8,
        Key::Pf9,
        Key::Pf10,
        Key::Pf11,
        Key::Pf12,
        Key::Pf13,
        Key::Pf14,
        Key::Pf15,
        Key::Pf16,
        Key::Pf17,
        Key::Pf18,
        Key::Pf19,
        Key::Pf20,
        Key::Pf21,
        Key::Pf22,
        Key::Pf23,
        Key::Pf24,
        Key::Enter,
        Key::FieldExit,
        Key::Reset,
        Key::Quit,
        Key::SysRq,
        Key::Attn,
        Key::Blank1,
        Key::Clear,
        Key::Blank2,
        Key::EraseInput,
        Key::Print,
        Key::Help,
        Key::Hex,
        Key::Blank3,
        Key::Play,
        Key::Test,
        Key::SetUp,
        Key::Record,
        Key::Pause,
        Key::FieldMark,
        Key::CursorSelect,
        Key::CursorBlink,
        Key::EraseEof,
        Key::Volume,
        Key::AltCursor,
        Key::Ident,
        Key::Pa1,
        Key::Pa2,
        Key::NumpadBlank1,
        Key::NumpadBlank2,
        Key::NumpadBlank3,
        Key::NumpadBlank4,
        Key::NumpadSeven,
        Key::NumpadEight,
        Key::NumpadNine,
        Key::NumpadFieldMinus,
        Key::NumpadFour,
        Key::NumpadFive,
        Key::NumpadSix,
        Key::NumpadBlank5,
        Key::NumpadOne,
        Key::NumpadTwo,
        Key::NumpadThree,
        Key::NumpadFieldPlus,
        Key::NumpadZero,
        Key::NumpadPeriod,
        Key::Backtick,
        Key::Tilde,
        Key::One,
        Key::Bar,
        Key::Two,
        Key::At,
        Key::Three,
        Key::Hash,
        Key::Four,
        Key::Dollar,
        Key::Five,
        Key::Percent,
        Key::Six,
        Key::Not,
        Key::Seven,
        Key::Ampersand,
        Key::Eight,
        Key::Asterisk,
        Key::Nine,
        Key::LeftParen,
        Key::Zero,
        Key::RightParen,
        Key::Minus,
        Key::Underscore,
        Key::Equal,
        Key::Plus,
        Key::LowerQ,
        Key::UpperQ,
        Key::LowerW,
        Key::UpperW,
        Key::LowerE,
        Key::UpperE,
        Key::LowerR,
        Key::UpperR,
        Key::LowerT,
        Key::UpperT,
        Key::LowerY,
        Key::UpperY,
        Key::LowerU,
        Key::UpperU,
        Key::LowerI,
        Key::UpperI,
        Key::LowerO,
        Key::UpperO,
        Key::LowerP,
        Key::UpperP,
        Key::Cent,
        Key::Exclamation,
        Key::Backslash,
        Key::BrokenBar,
        Key::LowerA,
        Key::UpperA,
        Key::LowerS,
        Key::UpperS,
        Key::LowerD,
        Key::UpperD,
        Key::LowerF,
        Key::UpperF,
        Key::LowerG,
        Key::UpperG,
        Key::LowerH,
        Key::UpperH,
        Key::LowerJ,
        Key::UpperJ,
        Key::LowerK,
        Key::UpperK,
        Key::LowerL,
        Key::UpperL,
        Key::Semicolon,
        Key::Colon,
        Key::SingleQuote,
        Key::DoubleQuote,
        Key::LeftBrace,
        Key::RightBrace,
        Key::Less,
        Key::Greater,
        Key::LowerZ,
        Key::UpperZ,
        Key::LowerX,
        Key::UpperX,
        Key::LowerC,
        Key::UpperC,
        Key::LowerV,
        Key::UpperV,
        Key::LowerB,
        Key::UpperB,
        Key::LowerN,
        Key::UpperN,
        Key::LowerM,
        Key::UpperM,
        Key::Comma,
        Key::Period,
        Key::CenterPeriod,
        Key::Slash,
        Key::Question,
    ];

    /// Converts a raw identity to a [`Key`].
    ///
    /// Returns `None` if no key carries that identity.
    pub fn from_u16(value: u16) -> Option<Self> {
        // Linear scan; keymaps store `Key` values, so decoding never calls this.
        Key::ALL.iter().copied().find(|key| key.as_u16() == value)
    }

    /// Returns the stable integer identity of this key.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the category this key belongs to.
    pub fn category(self) -> KeyCategory {
        use Key::*;

        match self {
            LeftShift | RightShift | LeftAlt | RightAlt | CapsLock => KeyCategory::Modifier,

            Backspace | Backtab | Newline | Insert | Delete | Left | Up | Right | Down
            | RollUp | RollDown | Home | Dup | Blank4 | Jump | Swap => KeyCategory::Cursor,

            Pf1 | Pf2 | Pf3 | Pf4 | Pf5 | Pf6 | Pf7 | Pf8 | Pf9 | Pf10 | Pf11 | Pf12 | Pf13
            | Pf14 | Pf15 | Pf16 | Pf17 | Pf18 | Pf19 | Pf20 | Pf21 | Pf22 | Pf23 | Pf24 => {
                KeyCategory::Function
            }

            Enter | FieldExit | Reset | Quit | SysRq | Attn | Blank1 | Clear | Blank2
            | EraseInput | Print | Help | Hex | Blank3 | Play | Test | SetUp | Record | Pause
            | FieldMark | CursorSelect | CursorBlink | EraseEof | Volume | AltCursor | Ident
            | Pa1 | Pa2 => KeyCategory::Control,

            NumpadBlank1 | NumpadBlank2 | NumpadBlank3 | NumpadBlank4 | NumpadSeven
            | NumpadEight | NumpadNine | NumpadFieldMinus | NumpadFour | NumpadFive | NumpadSix
            | NumpadBlank5 | NumpadOne | NumpadTwo | NumpadThree | NumpadFieldPlus | NumpadZero
            | NumpadPeriod => KeyCategory::NumberPad,

            Space | Tab | Backtick | Tilde | One | Bar | Two | At | Three | Hash | Four
            | Dollar | Five | Percent | Six | Not | Seven | Ampersand | Eight | Asterisk | Nine
            | LeftParen | Zero | RightParen | Minus | Underscore | Equal | Plus | LowerQ
            | UpperQ | LowerW | UpperW | LowerE | UpperE | LowerR | UpperR | LowerT | UpperT
            | LowerY | UpperY | LowerU | UpperU | LowerI | UpperI | LowerO | UpperO | LowerP
            | UpperP | Cent | Exclamation | Backslash | BrokenBar | LowerA | UpperA | LowerS
            | UpperS | LowerD | UpperD | LowerF | UpperF | LowerG | UpperG | LowerH | UpperH
            | LowerJ | UpperJ | LowerK | UpperK | LowerL | UpperL | Semicolon | Colon
            | SingleQuote | DoubleQuote | LeftBrace | RightBrace | Less | Greater | LowerZ
            | UpperZ | LowerX | UpperX | LowerC | UpperC | LowerV | UpperV | LowerB | UpperB
            | LowerN | UpperN | LowerM | UpperM | Comma | Period | CenterPeriod | Slash
            | Question => KeyCategory::Character,
        }
    }

    /// Returns the character this key stands for.
    ///
    /// Defined only for [`KeyCategory::Character`] keys, whose identity is the
    /// Latin-1 code point of the character.  Every other key returns `None`.
    pub fn to_char(self) -> Option<char> {
        match self.category() {
            KeyCategory::Character => u8::try_from(self.as_u16()).ok().map(char::from),
            _ => None,
        }
    }

    /// Returns `true` for the 52 letter keys `a`–`z` and `A`–`Z`.
    pub fn is_alphabetic(self) -> bool {
        self.letter_pair().is_some()
    }

    /// Maps a lower-case letter key to its upper-case counterpart.
    ///
    /// Any other key (including non-ASCII Latin-1 letters, which have no
    /// counterpart on the keyboard) is returned unchanged.
    pub fn to_uppercase(self) -> Key {
        self.letter_pair().map_or(self, |(_, upper)| upper)
    }

    /// Maps an upper-case letter key to its lower-case counterpart.
    ///
    /// Any other key is returned unchanged.
    pub fn to_lowercase(self) -> Key {
        self.letter_pair().map_or(self, |(lower, _)| lower)
    }

    /// Returns the `(lower, upper)` pair a letter key belongs to.
    fn letter_pair(self) -> Option<(Key, Key)> {
        use Key::*;

        match self {
            LowerA | UpperA => Some((LowerA, UpperA)),
            LowerB | UpperB => Some((LowerB, UpperB)),
            LowerC | UpperC => Some((LowerC, UpperC)),
            LowerD | UpperD => Some((LowerD, UpperD)),
            LowerE | UpperE => Some((LowerE, UpperE)),
            LowerF | UpperF => Some((LowerF, UpperF)),
            LowerG | UpperG => Some((LowerG, UpperG)),
            LowerH | UpperH => Some((LowerH, UpperH)),
            LowerI | UpperI => Some((LowerI, UpperI)),
            LowerJ | UpperJ => Some((LowerJ, UpperJ)),
            LowerK | UpperK => Some((LowerK, UpperK)),
            LowerL | UpperL => Some((LowerL, UpperL)),
            LowerM | UpperM => Some((LowerM, UpperM)),
            LowerN | UpperN => Some((LowerN, UpperN)),
            LowerO | UpperO => Some((LowerO, UpperO)),
            LowerP | UpperP => Some((LowerP, UpperP)),
            LowerQ | UpperQ => Some((LowerQ, UpperQ)),
            LowerR | UpperR => Some((LowerR, UpperR)),
            LowerS | UpperS => Some((LowerS, UpperS)),
            LowerT | UpperT => Some((LowerT, UpperT)),
            LowerU | UpperU => Some((LowerU, UpperU)),
            LowerV | UpperV => Some((LowerV, UpperV)),
            LowerW | UpperW => Some((LowerW, UpperW)),
            LowerX | UpperX => Some((LowerX, UpperX)),
            LowerY | UpperY => Some((LowerY, UpperY)),
            LowerZ | UpperZ => Some((LowerZ, UpperZ)),
            _ => None,
        }
    }
}

/// Maps a decoded key to its ASCII (Latin-1) character.
///
/// Returns `None` when there is no key, or when the key is not a character
/// key.  For every character key `k`, the result is the character whose code
/// point equals `k.as_u16()`.
pub fn decode_key_to_character(key: Option<Key>) -> Option<char> {
    key.and_then(Key::to_char)
}
