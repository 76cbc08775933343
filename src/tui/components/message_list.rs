//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display message bubbles in log order
//! - Show the welcome panel when the log is empty
//! - Show the typing indicator while a reply is pending
//! - Jump to the newest entry whenever the log grows
//! - Cache bubble heights (messages never change, so a height is computed once per width)
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice (props).
//! Since `Component::render` takes `&mut self`, the layout cache and scroll
//! state are updated during the render pass.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::components::typing_indicator::{TYPING_HEIGHT, TypingIndicator};
use crate::tui::components::welcome::WelcomePanel;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Blank rows between consecutive bubbles.
const GAP: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Canvas height of the last frame, typing indicator included
    pub content_height: u16,
    /// Message count at the last frame; a change re-pins to the bottom
    seen_count: usize,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
            seen_count: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Pin to the newest entry if the log grew since the last frame.
    fn follow_new_messages(&mut self, count: usize) {
        if count != self.seen_count {
            self.stick_to_bottom = true;
            self.seen_count = count;
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub awaiting_response: bool,
    pub palette: Palette,
    pub disclaimer_threshold: usize,
    /// Animation tick for the typing indicator
    pub frame_index: usize,
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.follow_new_messages(self.messages.len());

        if self.messages.is_empty() && !self.awaiting_response {
            WelcomePanel::new(self.palette).render(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            let height =
                MessageBubble::calculate_height(message, self.disclaimer_threshold, content_width);
            layout.heights.push(height.saturating_add(GAP));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.messages.len(), content_width);

        let messages_height = layout.total();
        let typing_height = if self.awaiting_response {
            TYPING_HEIGHT
        } else {
            0
        };
        let canvas_height = messages_height.saturating_add(typing_height);

        // 2. Clamp scroll offset
        self.state.viewport_height = area.height;
        self.state.content_height = canvas_height;
        if self.state.stick_to_bottom {
            // Pin before picking visible rows so a resize draws the new bottom
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: self.state.max_offset(),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into the ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.buf_mut().set_style(
            Rect::new(0, 0, content_width, canvas_height),
            self.palette.base,
        );

        let mut y_offset = self.state.layout.offset_of(visible_range.start);
        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height.saturating_sub(GAP));
            let bubble = MessageBubble::new(
                &self.messages[i],
                self.palette,
                self.disclaimer_threshold,
            );
            scroll_view.render_widget(bubble, rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.awaiting_response {
            let rect = Rect::new(0, messages_height, content_width, TYPING_HEIGHT);
            scroll_view.render_widget(
                TypingIndicator {
                    palette: self.palette,
                    frame: self.frame_index,
                },
                rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state rather than `MessageList`, which is rebuilt
/// every frame and cannot hold the scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights (gap included) and their running totals.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    ///
    /// Messages are immutable, so only a width change (re-wrap) or a shorter
    /// log (new session) invalidates anything.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas row where message `index` starts.
    pub fn offset_of(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights.get(index - 1).copied().unwrap_or(self.total())
        }
    }

    /// Messages overlapping the viewport, with half a screen of slack each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
