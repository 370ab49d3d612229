use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Article, Direction, RenderOutcome};
use crate::errors::HeadlinesResult;
use crate::render::animation::{Animator, TransitionDone, TransitionWait};
use crate::render::markup::{escape_html, format_date_dmy, strip_quotes};
use crate::render::opener::Opener;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other(String),
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" | "enter" | "\n" | "\r" => Key::Enter,
            " " | "Space" | "space" => Key::Space,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn activates(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Input aimed at one rendered item, delivered to the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Click { index: usize },
    KeyDown { index: usize, key: Key },
}

impl ViewEvent {
    fn target(&self) -> usize {
        match self {
            ViewEvent::Click { index } | ViewEvent::KeyDown { index, .. } => *index,
        }
    }

    fn activates(&self) -> bool {
        match self {
            ViewEvent::Click { .. } => true,
            ViewEvent::KeyDown { key, .. } => key.activates(),
        }
    }
}

/// One article as it appears on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub article: Article,
    pub title: String,
    pub byline: String,
    pub published: Option<String>,
    pub body: String,
    /// Navigation target with quote characters removed
    pub url: String,
    pub markup: String,
}

impl RenderedItem {
    pub fn from_article(article: &Article) -> Self {
        let title = article.display_title().to_string();
        let byline = article.byline().to_string();
        let published = format_date_dmy(&article.published_at);
        let body = article.body_for_display().to_string();
        let url = strip_quotes(&article.url);

        let published_markup = published
            .as_ref()
            .map(|date| {
                format!(
                    r#", <span class="headline-published">Published on {}</span>"#,
                    date
                )
            })
            .unwrap_or_default();

        let markup = format!(
            concat!(
                r#"<article class="headline" data-url="{url}" tabindex="0" role="link" aria-label="Open article: {label}">"#,
                r#"<h2 class="headline-title">{title}</h2>"#,
                r#"<p class="headline-meta"><span class="headline-byline">{byline}</span>{published}</p>"#,
                r#"<p class="headline-body">{body}</p>"#,
                r#"</article>"#
            ),
            url = url,
            label = escape_html(&title),
            title = escape_html(&title),
            byline = escape_html(&byline),
            published = published_markup,
            body = escape_html(&body),
        );

        Self {
            article: article.clone(),
            title,
            byline,
            published,
            body,
            url,
            markup,
        }
    }

    /// Plain-text form for terminals, numbered from 1
    pub fn to_text(&self, number: usize) -> String {
        let mut text = format!("[{}] {}\n    {}", number, self.title, self.byline);
        if let Some(date) = &self.published {
            text.push_str(&format!(", published on {}", date));
        }
        if !self.body.is_empty() {
            text.push_str(&format!("\n    {}", self.body));
        }
        if !self.url.is_empty() {
            text.push_str(&format!("\n    {}", self.url));
        }
        text
    }
}

/// The container the renderer draws into.
#[derive(Debug, Default)]
pub struct FeedView {
    items: Vec<RenderedItem>,
    bound: bool,
    bindings: usize,
}

impl FeedView {
    pub fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether activation handling is wired to this container
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn binding_count(&self) -> usize {
        self.bindings
    }

    /// Titles of the displayed articles, as fetched
    pub fn titles(&self) -> Vec<String> {
        self.items.iter().map(|i| i.article.title.clone()).collect()
    }

    pub fn markup(&self) -> String {
        let inner: String = self.items.iter().map(|i| i.markup.as_str()).collect();
        format!(r#"<section class="headlines">{}</section>"#, inner)
    }

    pub fn text(&self) -> String {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| item.to_text(i + 1))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn bind(&mut self) {
        self.bound = true;
        self.bindings += 1;
    }

    /// The URL an event should open, if any
    fn activation_target(&self, event: &ViewEvent) -> Option<&str> {
        if !self.bound || !event.activates() {
            return None;
        }
        self.items
            .get(event.target())
            .map(|item| item.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

pub struct FeedRenderer {
    view: FeedView,
    opener: Arc<dyn Opener>,
    animator: Option<Arc<dyn Animator>>,
    max_articles: usize,
}

impl FeedRenderer {
    pub fn new(opener: Arc<dyn Opener>, max_articles: usize) -> Self {
        Self {
            view: FeedView::default(),
            opener,
            animator: None,
            max_articles,
        }
    }

    pub fn with_animator(mut self, animator: Arc<dyn Animator>) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn view(&self) -> &FeedView {
        &self.view
    }

    /// Replace the displayed set with `articles`.
    ///
    /// Input with nothing presentable leaves the current content alone.
    pub fn render(&mut self, articles: &[Article]) -> RenderOutcome {
        let items: Vec<RenderedItem> = articles
            .iter()
            .filter(|a| a.is_presentable())
            .take(self.max_articles)
            .map(RenderedItem::from_article)
            .collect();

        if items.is_empty() {
            debug!(received = articles.len(), "nothing presentable, keeping current items");
            return RenderOutcome::Skipped;
        }

        self.view.items = items;

        if let Some(animator) = &self.animator {
            animator.items_entrance(&self.view.items);
            animator.attach_affordances(&self.view.items);
        }

        if !self.view.bound {
            self.view.bind();
        }

        debug!(count = self.view.items.len(), "rendered items");
        RenderOutcome::Rendered(self.view.items.len())
    }

    /// Route an event through the container. Returns whether a URL was opened.
    pub fn handle_event(&self, event: &ViewEvent) -> HeadlinesResult<bool> {
        match self.view.activation_target(event) {
            Some(url) => {
                self.opener.open(url)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn page_entrance(&self) {
        if let Some(animator) = &self.animator {
            animator.page_entrance();
        }
    }

    /// Start the exit transition for the current items. `None` when there is
    /// nothing on screen or no animator to wait for.
    pub fn play_exit(&self, direction: Direction) -> Option<TransitionWait> {
        let animator = self.animator.as_ref()?;
        if self.view.is_empty() {
            return None;
        }

        let (done, wait) = TransitionDone::channel();
        animator.exit(&self.view.items, direction, done);
        Some(wait)
    }
}

impl std::fmt::Debug for FeedRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRenderer")
            .field("view", &self.view)
            .field("animated", &self.animator.is_some())
            .field("max_articles", &self.max_articles)
            .finish()
    }
}

/// Log-and-continue wrapper for activation from interactive surfaces
pub fn activate(renderer: &FeedRenderer, event: &ViewEvent) -> bool {
    match renderer.handle_event(event) {
        Ok(opened) => opened,
        Err(e) => {
            warn!(error = %e, "could not open article");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::opener::MockOpener;
    use scraper::{Html, Selector};
    use std::sync::Mutex;

    fn article(title: &str) -> Article {
        Article::new(title.to_string(), format!("https://news.example.com/{}", title))
            .with_author(Some("Reporter".to_string()))
            .with_description(format!("{} description long enough to show", title))
            .with_published_at("2024-03-05T10:00:00Z".to_string())
    }

    fn renderer() -> FeedRenderer {
        FeedRenderer::new(Arc::new(MockOpener::new()), 4)
    }

    fn renderer_expecting(url: &'static str) -> FeedRenderer {
        let mut opener = MockOpener::new();
        opener
            .expect_open()
            .withf(move |u| u == url)
            .times(1)
            .returning(|_| Ok(()));
        FeedRenderer::new(Arc::new(opener), 4)
    }

    #[test]
    fn test_render_replaces_content() {
        let mut renderer = renderer();

        renderer.render(&[article("a"), article("b")]);
        let outcome = renderer.render(&[article("c")]);

        assert_eq!(outcome, RenderOutcome::Rendered(1));
        assert_eq!(renderer.view().titles(), vec!["c"]);
    }

    #[test]
    fn test_empty_input_keeps_prior_content() {
        let mut renderer = renderer();
        renderer.render(&[article("a")]);

        assert_eq!(renderer.render(&[]), RenderOutcome::Skipped);
        assert_eq!(
            renderer.render(&[Article::new(String::new(), "https://x.example".to_string())]),
            RenderOutcome::Skipped
        );
        assert_eq!(renderer.view().titles(), vec!["a"]);
    }

    #[test]
    fn test_render_caps_and_filters() {
        let mut renderer = renderer();
        let mut input = vec![Article::new(String::new(), String::new())];
        input.extend((0..6).map(|i| article(&format!("s{}", i))));

        renderer.render(&input);

        assert_eq!(renderer.view().titles(), vec!["s0", "s1", "s2", "s3"]);
    }

    #[test]
    fn test_render_is_idempotent_and_binds_once() {
        let mut renderer = renderer();
        let input = vec![article("a"), article("b")];

        renderer.render(&input);
        let first = renderer.view().markup();
        renderer.render(&input);

        assert_eq!(renderer.view().markup(), first);
        assert!(renderer.view().is_bound());
        assert_eq!(renderer.view().binding_count(), 1);
    }

    #[test]
    fn test_item_fields_and_fallbacks() {
        let bare = Article::new(String::new(), "https://x.example".to_string())
            .with_source(Some("Wire".to_string()))
            .with_content("Only content here".to_string())
            .with_published_at("not a date".to_string());

        let item = RenderedItem::from_article(&bare);

        assert_eq!(item.title, "Untitled");
        assert_eq!(item.byline, "Wire");
        assert_eq!(item.published, None);
        assert_eq!(item.body, "Only content here");
        assert!(!item.markup.contains("Published on"));
    }

    #[test]
    fn test_markup_structure() {
        let item = RenderedItem::from_article(&article("rust"));
        let html = Html::parse_fragment(&item.markup);

        let node = html
            .select(&Selector::parse("article.headline").unwrap())
            .next()
            .unwrap();
        assert_eq!(node.value().attr("data-url"), Some("https://news.example.com/rust"));
        assert_eq!(node.value().attr("role"), Some("link"));
        assert_eq!(node.value().attr("tabindex"), Some("0"));

        let published = html
            .select(&Selector::parse(".headline-published").unwrap())
            .next()
            .unwrap();
        assert_eq!(published.text().collect::<String>(), "Published on 05/03/2024");
    }

    #[test]
    fn test_markup_escapes_text_and_strips_url_quotes() {
        let hostile = Article::new(
            "<script>alert('x')</script>".to_string(),
            r#"https://x.example/"><img src=x onerror='y'>"#.to_string(),
        )
        .with_author(Some("A & B".to_string()));

        let item = RenderedItem::from_article(&hostile);

        assert!(!item.markup.contains("<script>"));
        assert!(item.markup.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(item.markup.contains("A &amp; B"));
        assert_eq!(item.url, "https://x.example/><img src=x onerror=y>");
        assert!(item.markup.contains(r#"data-url="https://x.example/><img src=x onerror=y>""#));
    }

    #[test]
    fn test_accessibility_label_keeps_quoted_title() {
        let quoted = Article::new(
            r#"He said "go" & it's done"#.to_string(),
            "https://news.example.com/quoted".to_string(),
        )
        .with_description("A story with enough text to be shown".to_string());

        let item = RenderedItem::from_article(&quoted);
        let html = Html::parse_fragment(&item.markup);
        let node = html
            .select(&Selector::parse("article.headline").unwrap())
            .next()
            .unwrap();

        assert_eq!(
            node.value().attr("aria-label"),
            Some(r#"Open article: He said "go" & it's done"#)
        );
        assert_eq!(node.value().attr("role"), Some("link"));
    }

    #[test]
    fn test_click_opens_url() {
        let mut renderer = renderer_expecting("https://news.example.com/b");
        renderer.render(&[article("a"), article("b")]);

        assert!(renderer.handle_event(&ViewEvent::Click { index: 1 }).unwrap());
    }

    #[test]
    fn test_enter_and_space_activate() {
        let mut opener = MockOpener::new();
        opener.expect_open().times(2).returning(|_| Ok(()));
        let mut renderer = FeedRenderer::new(Arc::new(opener), 4);
        renderer.render(&[article("a")]);

        let enter = ViewEvent::KeyDown { index: 0, key: Key::from_name("Enter") };
        let space = ViewEvent::KeyDown { index: 0, key: Key::from_name(" ") };
        let other = ViewEvent::KeyDown { index: 0, key: Key::from_name("x") };

        assert!(renderer.handle_event(&enter).unwrap());
        assert!(renderer.handle_event(&space).unwrap());
        assert!(!renderer.handle_event(&other).unwrap());
    }

    #[test]
    fn test_events_ignored_before_first_render_and_out_of_range() {
        let mut renderer = renderer();

        assert!(!renderer.handle_event(&ViewEvent::Click { index: 0 }).unwrap());

        renderer.render(&[article("a")]);
        assert!(!renderer.handle_event(&ViewEvent::Click { index: 5 }).unwrap());
    }

    #[test]
    fn test_opener_failure_reported() {
        let mut opener = MockOpener::new();
        opener.expect_open().returning(|_| {
            Err(crate::errors::HeadlinesError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no browser",
            )))
        });
        let mut renderer = FeedRenderer::new(Arc::new(opener), 4);
        renderer.render(&[article("a")]);

        assert!(renderer.handle_event(&ViewEvent::Click { index: 0 }).is_err());
        assert!(!activate(&renderer, &ViewEvent::Click { index: 0 }));
    }

    #[derive(Default)]
    struct RecordingAnimator {
        calls: Mutex<Vec<String>>,
    }

    impl Animator for RecordingAnimator {
        fn items_entrance(&self, items: &[RenderedItem]) {
            self.calls.lock().unwrap().push(format!("enter:{}", items.len()));
        }

        fn attach_affordances(&self, items: &[RenderedItem]) {
            self.calls.lock().unwrap().push(format!("hover:{}", items.len()));
        }

        fn exit(&self, items: &[RenderedItem], direction: Direction, done: TransitionDone) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("exit:{}:{}", items.len(), direction));
            done.finish();
        }
    }

    #[test]
    fn test_animator_hooks() {
        let animator = Arc::new(RecordingAnimator::default());
        let mut renderer = renderer().with_animator(animator.clone());

        assert!(renderer.play_exit(Direction::Next).is_none());

        renderer.render(&[article("a"), article("b")]);
        let wait = renderer.play_exit(Direction::Previous).unwrap();
        assert!(wait.wait());

        assert_eq!(
            *animator.calls.lock().unwrap(),
            vec!["enter:2", "hover:2", "exit:2:previous"]
        );
    }

    #[test]
    fn test_no_animator_is_static() {
        let mut renderer = renderer();
        renderer.render(&[article("a")]);

        renderer.page_entrance();
        assert!(renderer.play_exit(Direction::Next).is_none());
        assert_eq!(renderer.view().items().len(), 1);
    }

    #[test]
    fn test_text_rendering() {
        let mut renderer = renderer();
        renderer.render(&[article("a")]);

        let text = renderer.view().text();

        assert!(text.starts_with("[1] a\n    Reporter, published on 05/03/2024"));
        assert!(text.contains("https://news.example.com/a"));
    }
}
