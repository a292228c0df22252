use crate::error::StoryError;
use crate::models::{cycle_option, ExamplePrompt, FormState, GenerationRequest, Story, GENRES, LENGTHS};

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "✓ Copied!";

/// Display mode of the output region. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    ShowingResult(Story),
    ShowingError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Genre,
    Length,
    Examples,
}

impl Focus {
    const ORDER: [Self; 4] = [Self::Prompt, Self::Genre, Self::Length, Self::Examples];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub exit_pending: bool,
    pub server_url: String,

    pub form: FormState,
    pub focus: Focus,
    pub ui_state: UiState,

    pub examples: Vec<ExamplePrompt>,
    pub selected_example: usize,

    pub output_scroll: u16,

    // Copy feedback: only the newest copy may restore the label
    pub copy_seq: u64,
    pub copy_confirmed: bool,
}

impl App {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            exit_pending: false,
            server_url: server_url.into(),
            form: FormState::new(),
            focus: Focus::Prompt,
            ui_state: UiState::Idle,
            examples: Vec::new(),
            selected_example: 0,
            output_scroll: 0,
            copy_seq: 0,
            copy_confirmed: false,
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.ui_state, UiState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.ui_state {
            UiState::ShowingError(message) => Some(message),
            _ => None,
        }
    }

    pub const fn current_story(&self) -> Option<&Story> {
        match &self.ui_state {
            UiState::ShowingResult(story) => Some(story),
            _ => None,
        }
    }

    // --- form submission ---

    /// Validate the form and move to `Loading`.
    ///
    /// Returns the request to send, or `None` after switching to the
    /// validation error. Submitting while already loading is allowed.
    pub fn submit(&mut self) -> Option<GenerationRequest> {
        let Some(request) = self.form.to_request() else {
            self.show_error(&StoryError::EmptyPrompt);
            return None;
        };
        self.ui_state = UiState::Loading;
        Some(request)
    }

    /// Apply a finished request. The last one to arrive wins.
    pub fn finish_story(&mut self, result: Result<Story, StoryError>) {
        match result {
            Ok(story) => self.show(story),
            Err(err) => self.show_error(&err),
        }
    }

    // --- result panel ---

    pub fn show(&mut self, story: Story) {
        self.output_scroll = 0;
        self.ui_state = UiState::ShowingResult(story);
    }

    pub fn show_error(&mut self, err: &StoryError) {
        self.ui_state = UiState::ShowingError(err.to_string());
    }

    pub fn clear_form(&mut self) {
        self.form.reset();
        self.ui_state = UiState::Idle;
        self.focus = Focus::Prompt;
    }

    pub fn new_story(&mut self) {
        self.ui_state = UiState::Idle;
        self.form.prompt.clear();
        self.focus = Focus::Prompt;
    }

    /// Start a copy of the displayed story. Returns its sequence number and
    /// the clipboard text, or `None` when nothing is displayed.
    pub fn begin_copy(&mut self) -> Option<(u64, String)> {
        let text = self.current_story()?.clipboard_text();
        self.copy_seq += 1;
        Some((self.copy_seq, text))
    }

    pub const fn copy_succeeded(&mut self, seq: u64) {
        if seq == self.copy_seq {
            self.copy_confirmed = true;
        }
    }

    pub const fn copy_feedback_expired(&mut self, seq: u64) {
        if seq == self.copy_seq {
            self.copy_confirmed = false;
        }
    }

    pub const fn copy_label(&self) -> &'static str {
        if self.copy_confirmed {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    pub const fn scroll_output_up(&mut self, amount: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(amount);
    }

    pub const fn scroll_output_down(&mut self, amount: u16) {
        self.output_scroll = self.output_scroll.saturating_add(amount);
    }

    // --- example prompts ---

    pub fn append_examples(&mut self, examples: impl IntoIterator<Item = ExamplePrompt>) {
        self.examples.extend(examples);
    }

    pub fn select_next_example(&mut self) {
        if !self.examples.is_empty() {
            self.selected_example = (self.selected_example + 1).min(self.examples.len() - 1);
        }
    }

    pub const fn select_prev_example(&mut self) {
        self.selected_example = self.selected_example.saturating_sub(1);
    }

    /// Copy an example into the form and hide any error. Never touches the
    /// network.
    pub fn apply_example(&mut self, index: usize) {
        let Some(example) = self.examples.get(index) else {
            return;
        };
        self.form.prompt.clone_from(&example.prompt);
        self.form.genre.clone_from(&example.genre);
        if matches!(self.ui_state, UiState::ShowingError(_)) {
            self.ui_state = UiState::Idle;
        }
    }

    pub fn apply_selected_example(&mut self) {
        self.apply_example(self.selected_example);
    }

    // --- form editing ---

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn type_char(&mut self, c: char) {
        if self.focus == Focus::Prompt {
            self.form.prompt.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == Focus::Prompt {
            self.form.prompt.pop();
        }
    }

    /// Left/Right on a selector field.
    pub fn cycle_selection(&mut self, forward: bool) {
        match self.focus {
            Focus::Genre => self.form.genre = cycle_option(GENRES, &self.form.genre, forward),
            Focus::Length => self.form.length = cycle_option(LENGTHS, &self.form.length, forward),
            Focus::Prompt | Focus::Examples => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(crate::models::DEFAULT_SERVER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<ExamplePrompt> {
        vec![
            ExamplePrompt {
                prompt: "A detective who can speak to ghosts".to_string(),
                genre: "mystery".to_string(),
            },
            ExamplePrompt {
                prompt: "An explorer who finds a map of possibilities".to_string(),
                genre: "adventure".to_string(),
            },
        ]
    }

    #[test]
    fn test_app_new() {
        let app = App::default();
        assert_eq!(app.ui_state, UiState::Idle);
        assert_eq!(app.focus, Focus::Prompt);
        assert_eq!(app.form.prompt, "A robot who falls in love with a human");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_submit_blank_prompt_shows_validation_error() {
        let mut app = App::default();
        app.form.prompt = "   ".to_string();
        assert!(app.submit().is_none());
        assert_eq!(app.error_message(), Some("Please enter a story prompt"));
    }

    #[test]
    fn test_submit_valid_prompt_enters_loading() {
        let mut app = App::default();
        app.form.prompt = "  A chef  ".to_string();
        app.form.genre = "horror".to_string();
        app.form.length = "long".to_string();
        app.ui_state = UiState::ShowingError("Error: old".to_string());

        let request = app.submit().unwrap();

        assert_eq!(request.prompt, "A chef");
        assert_eq!(request.genre, "horror");
        assert_eq!(request.length, "long");
        assert!(app.is_loading());
        assert!(app.error_message().is_none());
    }

    #[test]
    fn test_submit_while_loading_is_allowed() {
        let mut app = App::default();
        assert!(app.submit().is_some());
        assert!(app.submit().is_some());
        assert!(app.is_loading());
    }

    #[test]
    fn test_finish_story_success() {
        let mut app = App::default();
        app.submit();
        app.finish_story(Ok(Story::new("T", "C")));
        assert_eq!(app.current_story(), Some(&Story::new("T", "C")));
        assert!(app.error_message().is_none());
    }

    #[test]
    fn test_finish_story_server_error() {
        let mut app = App::default();
        app.submit();
        app.finish_story(Err(StoryError::Server("model offline".to_string())));
        assert_eq!(app.error_message(), Some("Error: model offline"));
        assert!(app.current_story().is_none());
    }

    #[test]
    fn test_last_response_wins() {
        let mut app = App::default();
        app.submit();
        app.submit();
        app.finish_story(Ok(Story::new("second", "fast")));
        app.finish_story(Ok(Story::new("first", "slow")));
        assert_eq!(app.current_story().unwrap().title, "first");
    }

    #[test]
    fn test_apply_example_prefills_and_hides_error() {
        let mut app = App::default();
        app.append_examples(examples());
        app.ui_state = UiState::ShowingError("Please enter a story prompt".to_string());

        app.apply_example(1);

        assert_eq!(app.form.prompt, "An explorer who finds a map of possibilities");
        assert_eq!(app.form.genre, "adventure");
        assert_eq!(app.ui_state, UiState::Idle);
    }

    #[test]
    fn test_apply_example_keeps_displayed_story() {
        let mut app = App::default();
        app.append_examples(examples());
        app.show(Story::new("T", "C"));
        app.apply_example(0);
        assert!(app.current_story().is_some());
    }

    #[test]
    fn test_apply_example_out_of_range() {
        let mut app = App::default();
        let before = app.form.clone();
        app.apply_example(3);
        assert_eq!(app.form, before);
    }

    #[test]
    fn test_append_examples_keeps_order() {
        let mut app = App::default();
        app.append_examples(examples());
        assert_eq!(app.examples[0].genre, "mystery");
        assert_eq!(app.examples[1].genre, "adventure");
    }

    #[test]
    fn test_example_selection_clamps() {
        let mut app = App::default();
        app.select_next_example();
        assert_eq!(app.selected_example, 0);
        app.append_examples(examples());
        app.select_next_example();
        app.select_next_example();
        assert_eq!(app.selected_example, 1);
        app.select_prev_example();
        app.select_prev_example();
        assert_eq!(app.selected_example, 0);
    }

    #[test]
    fn test_clear_form() {
        let mut app = App::default();
        app.form.genre = "horror".to_string();
        app.form.length = "long".to_string();
        app.focus = Focus::Genre;
        app.show(Story::new("T", "C"));

        app.clear_form();

        assert_eq!(app.form.prompt, "");
        assert_eq!(app.form.genre, "fantasy");
        assert_eq!(app.form.length, "short");
        assert_eq!(app.ui_state, UiState::Idle);
        assert_eq!(app.focus, Focus::Prompt);
    }

    #[test]
    fn test_new_story_keeps_selectors() {
        let mut app = App::default();
        app.form.genre = "horror".to_string();
        app.form.length = "long".to_string();
        app.focus = Focus::Examples;
        app.show(Story::new("T", "C"));

        app.new_story();

        assert_eq!(app.ui_state, UiState::Idle);
        assert_eq!(app.form.prompt, "");
        assert_eq!(app.form.genre, "horror");
        assert_eq!(app.form.length, "long");
        assert_eq!(app.focus, Focus::Prompt);
    }

    #[test]
    fn test_begin_copy_requires_story() {
        let mut app = App::default();
        assert!(app.begin_copy().is_none());
        app.show(Story::new("X", "Y"));
        assert_eq!(app.begin_copy(), Some((1, "X\n\nY".to_string())));
    }

    #[test]
    fn test_copy_feedback_window() {
        let mut app = App::default();
        app.show(Story::new("X", "Y"));
        let (first, _) = app.begin_copy().unwrap();
        app.copy_succeeded(first);
        assert_eq!(app.copy_label(), COPIED_LABEL);

        // A newer copy keeps the label until its own window ends
        let (second, _) = app.begin_copy().unwrap();
        app.copy_succeeded(second);
        app.copy_feedback_expired(first);
        assert_eq!(app.copy_label(), COPIED_LABEL);

        app.copy_feedback_expired(second);
        assert_eq!(app.copy_label(), COPY_LABEL);
    }

    #[test]
    fn test_typing_only_edits_prompt_when_focused() {
        let mut app = App::default();
        app.form.prompt.clear();
        app.type_char('a');
        app.focus_next();
        app.type_char('b');
        app.backspace();
        assert_eq!(app.form.prompt, "a");
        app.focus_prev();
        app.backspace();
        assert_eq!(app.form.prompt, "");
    }

    #[test]
    fn test_focus_cycle_wraps() {
        let mut app = App::default();
        app.focus_prev();
        assert_eq!(app.focus, Focus::Examples);
        app.focus_next();
        assert_eq!(app.focus, Focus::Prompt);
    }

    #[test]
    fn test_cycle_selection() {
        let mut app = App::default();
        app.focus = Focus::Genre;
        app.cycle_selection(true);
        assert_eq!(app.form.genre, "sci-fi");
        app.focus = Focus::Length;
        app.cycle_selection(false);
        assert_eq!(app.form.length, "long");
        app.focus = Focus::Prompt;
        app.cycle_selection(true);
        assert_eq!(app.form.genre, "sci-fi");
        assert_eq!(app.form.length, "long");
    }

    #[test]
    fn test_output_scroll() {
        let mut app = App::default();
        app.scroll_output_down(5);
        app.scroll_output_up(2);
        assert_eq!(app.output_scroll, 3);
        app.show(Story::new("T", "C"));
        assert_eq!(app.output_scroll, 0);
    }
}
