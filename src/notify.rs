use std::cell::RefCell;
use std::rc::Rc;

use crate::node::Node;


pub type Redraw = Rc<dyn Fn()>;

// The single "current notification" cell. Shared between the view, the command
// interpreter and delayed announcements; mutated only from the main thread.
#[derive(Clone)]
pub struct Notify {
    text: Rc<RefCell<String>>,
    redraw: Redraw,
}

impl Notify {
    pub fn new(redraw: Redraw) -> Self {
        Notify { text: Rc::new(RefCell::new(String::new())), redraw }
    }

    pub fn set(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
        (self.redraw)();
    }

    pub fn text(&self) -> String { self.text.borrow().clone() }

    pub fn render(&self) -> Node {
        Node::elem("div")
            .with_class("notify")
            .with_attribute("aria-live", "assertive")
            .with_attribute("aria-atomic", "true")
            .with_text(self.text())
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn set_triggers_redraw() {
        let redraws = Rc::new(Cell::new(0));
        let counter = Rc::clone(&redraws);
        let notify = Notify::new(Rc::new(move || counter.set(counter.get() + 1)));
        notify.set("Not your turn");
        assert_eq!(notify.text(), "Not your turn");
        assert_eq!(notify.render().text_content(), "Not your turn");
        assert_eq!(redraws.get(), 1);
    }
}
