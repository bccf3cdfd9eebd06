//! Button label and title computation.
//!
//! The label summarizes the current selection on the control button:
//!
//! 1. `disabled_text` while the control is disabled (if non-empty)
//! 2. `non_selected_text` when nothing is selected
//! 3. `all_selected_text`, optionally with the count, when every option is
//!    selected, there is more than one option and the mode is multiple
//! 4. `"<count> <n_selected_text>"` above `number_displayed` selections
//! 5. Otherwise the selected labels joined by `delimiter_text`

use crate::app::SelectionMode;
use crate::domain::OptionModel;
use crate::Config;

/// Computes the button label for the current selection.
///
/// # Example
///
/// ```rust
/// use picklist::domain::{DataEntry, OptionModel};
/// use picklist::app::SelectionMode;
/// use picklist::ui::button_text;
/// use picklist::Config;
///
/// let model = OptionModel::from_data(&[
///     DataEntry::option("Red", "red").selected(),
///     DataEntry::option("Blue", "blue").selected(),
///     DataEntry::option("Green", "green"),
/// ]).unwrap();
/// let text = button_text(&Config::default(), &model, SelectionMode::Multiple, false);
/// assert_eq!(text, "Red, Blue");
/// ```
#[must_use]
pub fn button_text(config: &Config, model: &OptionModel, mode: SelectionMode, disabled: bool) -> String {
    if disabled && !config.disabled_text.is_empty() {
        return config.disabled_text.clone();
    }

    let selected: Vec<&str> = model.selected_items().map(|item| item.label.as_str()).collect();
    if selected.is_empty() {
        return config.non_selected_text.clone();
    }

    let option_count = model.item_count();
    if !config.all_selected_text.is_empty()
        && selected.len() == option_count
        && option_count != 1
        && mode.is_multiple()
    {
        return if config.select_all_number {
            format!("{} ({})", config.all_selected_text, selected.len())
        } else {
            config.all_selected_text.clone()
        };
    }

    if config.number_displayed != 0 && selected.len() > config.number_displayed {
        return format!("{} {}", selected.len(), config.n_selected_text);
    }

    selected.join(&config.delimiter_text)
}

/// Computes the button title: every selected label, or `non_selected_text`.
#[must_use]
pub fn button_title(config: &Config, model: &OptionModel) -> String {
    let selected: Vec<&str> = model.selected_items().map(|item| item.label.as_str()).collect();
    if selected.is_empty() {
        config.non_selected_text.clone()
    } else {
        selected.join(&config.delimiter_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataEntry, ItemId};

    fn model(selected: &[bool]) -> OptionModel {
        let entries: Vec<DataEntry> = selected
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let entry = DataEntry::option(format!("O{i}"), format!("o{i}"));
                if s {
                    entry.selected()
                } else {
                    entry
                }
            })
            .collect();
        OptionModel::from_data(&entries).unwrap()
    }

    #[test]
    fn test_none_selected() {
        let config = Config::default();
        let m = model(&[false, false]);
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, false), "None selected");
        assert_eq!(button_title(&config, &m), "None selected");
    }

    #[test]
    fn test_all_selected_with_and_without_count() {
        let mut config = Config::default();
        let m = model(&[true, true, true, true]);
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, false), "All selected (4)");

        config.select_all_number = false;
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, false), "All selected");
    }

    #[test]
    fn test_single_option_never_reports_all_selected() {
        let config = Config::default();
        let m = model(&[true]);
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, false), "O0");
        assert_eq!(button_text(&config, &m, SelectionMode::Single, false), "O0");
    }

    #[test]
    fn test_count_above_number_displayed() {
        let config = Config::default();
        let m = model(&[true, true, true, true, false]);
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, false), "4 selected");
        assert_eq!(button_title(&config, &m), "O0, O1, O2, O3");
    }

    #[test]
    fn test_disabled_text_takes_precedence() {
        let mut config = Config::default();
        let mut m = model(&[false, true]);
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, true), "O1");

        config.disabled_text = "Unavailable".to_string();
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, true), "Unavailable");

        m.item_mut(ItemId(0)).unwrap().selected = true;
        assert_eq!(button_text(&config, &m, SelectionMode::Multiple, false), "All selected (2)");
    }
}
