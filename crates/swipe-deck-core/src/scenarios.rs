//! Deck Scenario Tests
//!
//! Full drag -> release -> animate lifecycles through `Deck<T>`.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::{CardRole, Deck, DeckConfig, DeckItem, DeckPhase, DragHandler, Offset, Point, Viewport};

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        id: u32,
    }

    impl DeckItem for Card {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[derive(Debug, Default)]
    struct Swipes {
        right: Vec<u32>,
        left: Vec<u32>,
    }

    fn cards(ids: &[u32]) -> Vec<Card> {
        ids.iter().map(|&id| Card { id }).collect()
    }

    fn setup(ids: &[u32]) -> (Deck<Card>, Rc<RefCell<Swipes>>) {
        let swipes = Rc::new(RefCell::new(Swipes::default()));
        let right = swipes.clone();
        let left = swipes.clone();
        let deck = Deck::new(cards(ids), Viewport::new(400.0, 800.0), DeckConfig::default())
            .on_swipe_right(move |card: &Card| right.borrow_mut().right.push(card.id))
            .on_swipe_left(move |card: &Card| left.borrow_mut().left.push(card.id));
        (deck, swipes)
    }

    fn drag_and_release(deck: &mut Deck<Card>, dx: f64) {
        let start = Point::new(200.0, 400.0);
        assert!(deck.on_drag_start(start));
        deck.on_drag_move(Point::new(start.x + dx, start.y + 8.0));
        deck.on_drag_end(Point::new(start.x + dx, start.y + 8.0));
    }

    fn settle(deck: &mut Deck<Card>) {
        for _ in 0..2_000 {
            if !deck.machine().is_animating() {
                return;
            }
            deck.tick(16.0);
        }
        panic!("deck never settled");
    }

    fn top_id(deck: &Deck<Card>) -> Option<u32> {
        let rendered = deck.render(
            |card, layout| (layout.role == CardRole::Top).then_some(card.id),
            || None,
        );
        rendered.into_iter().flatten().next()
    }

    #[test]
    fn test_swipe_right_fires_once_and_advances() {
        let (mut deck, swipes) = setup(&[1, 2, 3]);
        drag_and_release(&mut deck, 150.0);

        // Nothing fires until the exit animation completes
        deck.tick(100.0);
        assert!(swipes.borrow().right.is_empty());

        settle(&mut deck);
        assert_eq!(swipes.borrow().right, vec![1]);
        assert!(swipes.borrow().left.is_empty());
        assert_eq!(deck.machine().index(), 1);
        assert_eq!(top_id(&deck), Some(2));
    }

    #[test]
    fn test_short_drag_returns_to_origin() {
        let (mut deck, swipes) = setup(&[1, 2, 3]);
        drag_and_release(&mut deck, 40.0);
        assert_eq!(deck.machine().phase(), DeckPhase::AnimatingReset);

        settle(&mut deck);
        assert!(swipes.borrow().right.is_empty());
        assert!(swipes.borrow().left.is_empty());
        assert_eq!(deck.machine().offset(), Offset::ZERO);
        assert_eq!(deck.machine().index(), 0);
        assert_eq!(top_id(&deck), Some(1));
    }

    #[test]
    fn test_swipe_left_fires_left_callback() {
        let (mut deck, swipes) = setup(&[1, 2, 3]);
        drag_and_release(&mut deck, -150.0);
        settle(&mut deck);
        assert_eq!(swipes.borrow().left, vec![1]);
        assert!(swipes.borrow().right.is_empty());
        assert_eq!(deck.machine().index(), 1);
    }

    #[test]
    fn test_exhausted_deck_renders_only_empty_view() {
        let (mut deck, swipes) = setup(&[1, 2]);
        drag_and_release(&mut deck, 300.0);
        settle(&mut deck);
        drag_and_release(&mut deck, -300.0);
        settle(&mut deck);

        assert_eq!(swipes.borrow().right, vec![1]);
        assert_eq!(swipes.borrow().left, vec![2]);
        assert_eq!(top_id(&deck), None);

        let rendered = deck.render(|card, _| format!("card {}", card.id), || "no more".to_string());
        assert_eq!(rendered, vec!["no more".to_string()]);
        assert!(!deck.on_drag_start(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_set_data_always_rewinds() {
        let (mut deck, _) = setup(&[1, 2, 3]);
        drag_and_release(&mut deck, 150.0);
        settle(&mut deck);
        assert_eq!(deck.machine().index(), 1);

        deck.set_data(cards(&[7, 8]));
        assert_eq!(deck.machine().index(), 0);
        assert_eq!(top_id(&deck), Some(7));

        deck.set_data(cards(&[7, 8]));
        assert_eq!(deck.machine().index(), 0);
    }

    #[test]
    fn test_render_order_puts_top_card_last() {
        let (deck, _) = setup(&[1, 2, 3]);
        let ids = deck.render(|card, _| card.id, || 0);
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_default_callbacks_are_noops() {
        let mut deck = Deck::new(cards(&[1]), Viewport::new(400.0, 800.0), DeckConfig::default());
        drag_and_release(&mut deck, 150.0);
        settle(&mut deck);
        assert_eq!(deck.machine().index(), 1);
        assert_eq!(deck.render(|card, _| card.id(), || 0), vec![0]);
    }
}
