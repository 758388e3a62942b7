//! Key-to-action mapping for the product page
//!
//! Converts raw `(KeyCode, KeyModifiers)` pairs into page actions or composer
//! input, taking the open composer into account so that each key press
//! resolves to at most one action.

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::page::composer::ComposerField;
use crate::page::model::{PageAction, ProductTab};

/// Keystrokes the composer overlay consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerInput {
    Char(char),
    Backspace,
    Rating(u8),
    AdjustRating(i8),
    ToggleFocus,
    Submit,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Page(PageAction),
    Composer(ComposerInput),
    /// Key was recognised but requires no further action (absorb it).
    Consumed,
}

/// Map a raw key event.
///
/// `composer` is the focused composer field when the overlay is open. Returns
/// `None` for keys with no meaning in the current context.
pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    composer: Option<ComposerField>,
) -> Option<KeyAction> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(KeyAction::Page(PageAction::Quit));
    }
    match composer {
        Some(field) => composer_key(code, field),
        None => normal_key(code),
    }
}

fn composer_key(code: KeyCode, field: ComposerField) -> Option<KeyAction> {
    let input = match (code, field) {
        (KeyCode::Esc, _) => ComposerInput::Close,
        (KeyCode::Enter, _) => ComposerInput::Submit,
        (KeyCode::Tab | KeyCode::BackTab, _) => ComposerInput::ToggleFocus,
        (KeyCode::Char(c @ '1'..='5'), ComposerField::Rating) => {
            ComposerInput::Rating(c as u8 - b'0')
        }
        (KeyCode::Left | KeyCode::Char('h'), ComposerField::Rating) => {
            ComposerInput::AdjustRating(-1)
        }
        (KeyCode::Right | KeyCode::Char('l'), ComposerField::Rating) => {
            ComposerInput::AdjustRating(1)
        }
        (KeyCode::Char(c), ComposerField::Body) => ComposerInput::Char(c),
        (KeyCode::Backspace, ComposerField::Body) => ComposerInput::Backspace,
        _ => return Some(KeyAction::Consumed),
    };
    Some(KeyAction::Composer(input))
}

fn normal_key(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => PageAction::NextTab,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => PageAction::PrevTab,
        KeyCode::Char(c @ '1'..='3') => {
            PageAction::SelectTab(ProductTab::from_index(c as usize - '1' as usize)?)
        }
        KeyCode::Char('n') | KeyCode::Char(']') => PageAction::NextPage,
        KeyCode::Char('p') | KeyCode::Char('[') => PageAction::PrevPage,
        KeyCode::Char('w') => PageAction::Compose,
        KeyCode::Char('r') => PageAction::Retry,
        KeyCode::Char('c') => PageAction::CopyShareLink,
        KeyCode::Char('j') | KeyCode::Down => PageAction::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => PageAction::ScrollUp,
        KeyCode::Esc => PageAction::DismissToast,
        KeyCode::Char('q') => PageAction::Quit,
        _ => return None,
    };
    Some(KeyAction::Page(action))
}
