use std::rc::Weak;

use super::*;

impl ReviewPage {
    /// Reads the server-rendered cards into a board and wires search,
    /// card clicks and the detail modal.
    pub(super) fn attach(controller: &Rc<AdminController>) -> Result<Rc<Self>, String> {
        let mut cards = Vec::new();
        let mut elements = HashMap::new();
        for (index, element) in query_all(MESSAGE_CARD_SELECTOR).into_iter().enumerate() {
            let id = element.get_attribute(MESSAGE_ID_ATTRIBUTE);
            let status = element
                .get_attribute(MESSAGE_STATUS_ATTRIBUTE)
                .as_deref()
                .and_then(MessageStatus::parse)
                .unwrap_or(MessageStatus::Checked);
            let detail = MessageDetail {
                name: text_at(&element, MESSAGE_NAME_SELECTOR),
                email: text_at(&element, MESSAGE_EMAIL_SELECTOR),
                subject: text_at(&element, MESSAGE_SUBJECT_SELECTOR),
                description: text_at(&element, MESSAGE_DESCRIPTION_SELECTOR),
            };
            let card = match id {
                Some(id) => MessageCard::new(id, detail, status),
                None => {
                    tracing::warn!("message card without {MESSAGE_ID_ATTRIBUTE}; it cannot be marked");
                    MessageCard::unkeyed(format!("{UNKEYED_CARD_PREFIX}{index}"), detail, status)
                }
            };
            elements.insert(card.id.clone(), element);
            cards.push(card);
        }

        let page = Rc::new(Self {
            controller: Rc::clone(controller),
            board: RefCell::new(MessageBoard::new(cards)),
            cards: RefCell::new(elements),
            modal: RefCell::new(DetailModal::default()),
            service: MessageReviewService::new(GlooTransport, controller.config.clone()),
            listeners: Listeners::default(),
        });
        page.bind_search()?;
        page.bind_cards()?;
        page.bind_modal()?;
        page.update_counter();
        tracing::debug!(cards = page.board.borrow().cards().len(), "review page attached");
        Ok(page)
    }

    fn on(
        self: &Rc<Self>,
        target: &EventTarget,
        event: &str,
        handler: impl Fn(&Rc<Self>, web_sys::Event) + 'static,
    ) -> Result<(), String> {
        bind(self, &self.listeners, target, event, handler)
    }

    fn bind_search(self: &Rc<Self>) -> Result<(), String> {
        let Some(input) = element_by_id(MESSAGE_SEARCH_INPUT_ID) else {
            return Ok(());
        };
        let source = input.clone();
        self.on(&input, "input", move |page, _event| {
            page.filter_messages(&control_value(&source));
        })
    }

    fn bind_cards(self: &Rc<Self>) -> Result<(), String> {
        let cards: Vec<(String, Element)> = self
            .cards
            .borrow()
            .iter()
            .map(|(id, element)| (id.clone(), element.clone()))
            .collect();
        for (id, element) in cards {
            self.on(&element, "click", move |page, event| {
                let on_action = event_target_element(&event)
                    .and_then(|target| target.closest(MESSAGE_CARD_ACTION_SELECTOR).ok().flatten())
                    .is_some();
                if !on_action {
                    page.view_full_message(&id);
                }
            })?;
        }
        Ok(())
    }

    fn bind_modal(self: &Rc<Self>) -> Result<(), String> {
        if let Some(close) = element_by_id(MESSAGE_MODAL_ID)
            .and_then(|modal| query_in(&modal, MODAL_CLOSE_SELECTOR))
        {
            self.on(&close, "click", |page, _event| page.close_modal())?;
        }

        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        self.on(&window, "click", |page, event| {
            let on_backdrop = event_target_element(&event)
                .is_some_and(|target| target.id() == MESSAGE_MODAL_ID);
            if page.modal.borrow_mut().click(on_backdrop) {
                page.render_modal();
            }
        })
    }

    /// Shows matching cards and hides the rest; the unchecked counter
    /// follows the visible cards.
    pub(super) fn filter_messages(&self, term: &str) {
        let visible = self.board.borrow_mut().filter(term);
        {
            let board = self.board.borrow();
            let elements = self.cards.borrow();
            for card in board.cards() {
                if let Some(element) = elements.get(&card.id) {
                    set_style(element, "display", card.display_value());
                }
            }
        }
        self.update_counter();
        tracing::debug!(term, visible, "messages filtered");
    }

    pub(super) fn view_full_message(&self, id: &str) {
        let Some(detail) = self.board.borrow().detail(id) else {
            tracing::warn!(message_id = id, "no message card to show");
            return;
        };
        set_text_by_id(MODAL_NAME_ID, &detail.name);
        set_text_by_id(MODAL_EMAIL_ID, &detail.email);
        set_text_by_id(MODAL_SUBJECT_ID, &detail.subject);
        set_text_by_id(MODAL_DESCRIPTION_ID, &detail.description);
        self.modal.borrow_mut().show(detail);
        self.render_modal();
    }

    fn close_modal(&self) {
        self.modal.borrow_mut().close();
        self.render_modal();
    }

    fn render_modal(&self) {
        if let Some(modal) = element_by_id(MESSAGE_MODAL_ID) {
            set_style(&modal, "display", self.modal.borrow().display_value());
        }
    }

    /// Sends the status change, then slides the card out and drops it
    /// once the exit animation has run. Failures surface as a blocking
    /// alert and leave the card in place.
    pub(super) fn mark_as_checked(self: &Rc<Self>, id: String) {
        if !self.board.borrow().accepts_status_update(&id) {
            tracing::warn!(message_id = %id, "card has no server id; not marking");
            return;
        }
        let page = Rc::clone(self);
        spawn_local(async move {
            match page.service.mark_as_checked(&id, &DomCsrfLookup).await {
                Ok(_) => page.animate_removal(&id),
                Err(error) => blocking_alert(&error.alert_text()),
            }
        });
    }

    fn animate_removal(self: &Rc<Self>, id: &str) {
        if !self.board.borrow_mut().begin_removal(id) {
            return;
        }
        if let Some(element) = self.cards.borrow().get(id) {
            set_style(element, "transition", CARD_EXIT_TRANSITION);
            set_style(element, "transform", CARD_EXIT_TRANSFORM);
            set_style(element, "opacity", "0");
        }

        let weak: Weak<Self> = Rc::downgrade(self);
        let removed = id.to_string();
        schedule(
            &self.controller,
            TaskKey::step(&format!("message-{id}"), "remove"),
            self.controller.config.card_removal_ms,
            move |_controller| {
                if let Some(page) = weak.upgrade() {
                    page.finish_removal(&removed);
                }
            },
        );
    }

    fn finish_removal(&self, id: &str) {
        if let Some(element) = self.cards.borrow_mut().remove(id) {
            element.remove();
        }
        let Some(outcome) = self.board.borrow_mut().finish_removal(id) else {
            return;
        };
        set_text_by_id(UNCHECKED_COUNT_ID, &outcome.unchecked_count.to_string());
        if outcome.board_empty {
            if let Some(grid) = element_by_id(MESSAGES_GRID_ID) {
                grid.set_inner_html(EMPTY_STATE_HTML);
            }
        }
    }

    fn update_counter(&self) {
        let count = self.board.borrow().unchecked_visible_count();
        set_text_by_id(UNCHECKED_COUNT_ID, &count.to_string());
    }

    pub(super) fn snapshot(&self) -> ReviewSnapshot {
        let board = self.board.borrow();
        ReviewSnapshot {
            cards: board.cards().len(),
            unchecked_visible: board.unchecked_visible_count(),
            search_term: board.term().to_string(),
            modal_visible: self.modal.borrow().is_visible(),
        }
    }
}
