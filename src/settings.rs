use strum::IntoEnumIterator;

use crate::node::Node;
use crate::notation::MoveStyle;


// Notation-style selector. The host wires the change event back to
// `RoundNvui::set_move_style` and redraws.
pub fn render_move_style_setting(current: MoveStyle) -> Node {
    Node::elem("select").with_class("move-style").with_children(MoveStyle::iter().map(|style| {
        let option = Node::elem("option").with_attribute("value", style.key());
        let option = if style == current {
            option.with_attribute("selected", "selected")
        } else {
            option
        };
        option.with_text(style.label())
    }))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_option_marked() {
        let node = render_move_style_setting(MoveStyle::Literate);
        let el = node.as_element().unwrap();
        let selected = el.find(&|e| e.attr("selected").is_some()).unwrap();
        assert_eq!(selected.attr("value"), Some("literate"));
        assert_eq!(el.children.len(), MoveStyle::iter().count());
    }
}
