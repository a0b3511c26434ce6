/// Topics a visitor can attach to a contact request. Order here is the order
/// the dropdown renders them in.
pub const TAG_OPTIONS: [&str; 4] = ["User Interface", "Scripting", "Discord Bot", "Website"];

/// Ordered set of picked tags. Toggling an already-picked tag removes it;
/// serialization preserves the order tags were picked in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSelection {
    picked: Vec<&'static str>,
}

impl TagSelection {
    pub fn toggle(&mut self, option: &'static str) {
        if !TAG_OPTIONS.contains(&option) {
            return;
        }
        if let Some(pos) = self.picked.iter().position(|t| *t == option) {
            self.picked.remove(pos);
        } else {
            self.picked.push(option);
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.picked.iter().any(|t| *t == option)
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    /// Backend-facing form: picked tags joined with `", "`, empty string when
    /// nothing is picked.
    pub fn serialized(&self) -> String {
        self.picked.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut sel = TagSelection::default();
        sel.toggle("Scripting");
        assert!(sel.contains("Scripting"));
        sel.toggle("Scripting");
        assert!(!sel.contains("Scripting"));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_serialized_form() {
        let mut sel = TagSelection::default();
        sel.toggle("User Interface");
        sel.toggle("Website");
        let before = sel.serialized();
        sel.toggle("Scripting");
        sel.toggle("Scripting");
        assert_eq!(sel.serialized(), before);
    }

    #[test]
    fn test_serialized_empty_iff_no_selection() {
        let mut sel = TagSelection::default();
        assert_eq!(sel.serialized(), "");
        sel.toggle("Discord Bot");
        assert!(!sel.serialized().is_empty());
        sel.toggle("Discord Bot");
        assert_eq!(sel.serialized(), "");
    }

    #[test]
    fn test_serialized_preserves_pick_order() {
        let mut sel = TagSelection::default();
        sel.toggle("Website");
        sel.toggle("Scripting");
        assert_eq!(sel.serialized(), "Website, Scripting");
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let mut sel = TagSelection::default();
        sel.toggle("Backend");
        assert!(sel.is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let mut sel = TagSelection::default();
        sel.toggle("Website");
        sel.toggle("Scripting");
        sel.toggle("Website");
        sel.toggle("Website");
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.serialized(), "Scripting, Website");
    }
}
