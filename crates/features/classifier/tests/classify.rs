use std::fmt::Write as _;
use std::sync::Mutex;
use urlc_classifier::{ClassifierError, CompletionBackend, UrlClassifier};
use urlc_domain::Classification::{Post, Seo};
use urlc_domain::SearchHit;

/// Answers SEO for numbered URLs containing `marker`, POST for the rest.
#[derive(Debug)]
struct KeywordModel {
    marker: &'static str,
    fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl KeywordModel {
    fn new(marker: &'static str) -> Self {
        Self { marker, fail: false, prompts: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
        Self { fail: true, ..Self::new("") }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionBackend for KeywordModel {
    async fn complete(&self, prompt: &str) -> Result<String, ClassifierError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        if self.fail {
            return Err(ClassifierError::Status { status: 429, body: "rate limited".to_owned(), context: None });
        }

        let mut reply = String::new();
        for line in prompt.lines() {
            if let Some((number, url)) = line.split_once(". ")
                && number.parse::<usize>().is_ok()
            {
                let label = if url.contains(self.marker) { "SEO" } else { "POST" };
                let _ = writeln!(reply, "{number}. {label}");
            }
        }
        Ok(reply)
    }
}

fn topics(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://a.com/guide/topic{i}")).collect()
}

#[tokio::test]
async fn obvious_urls_skip_the_model() {
    let model = KeywordModel::new("never");
    let classifier = UrlClassifier::new(&model, 20);

    let result = classifier.classify(&["https://mt-to.com/", "https://mt-to.com/mt/5733"]).await;
    assert_eq!(
        result,
        [("https://mt-to.com/".to_owned(), Seo), ("https://mt-to.com/mt/5733".to_owned(), Post)]
    );
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn ambiguous_urls_are_batched() {
    let model = KeywordModel::new("topic3");
    let classifier = UrlClassifier::new(&model, 2);

    let urls = topics(5);
    let result = classifier.classify(&urls).await;

    let classes: Vec<_> = result.iter().map(|(_, class)| *class).collect();
    assert_eq!(classes, [Post, Post, Post, Seo, Post]);
    assert_eq!(result[3].0, "https://a.com/guide/topic3");

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[1].contains("1. https://a.com/guide/topic2\n2. https://a.com/guide/topic3\n"));
}

#[tokio::test]
async fn failed_batches_default_to_posts() {
    let model = KeywordModel::failing();
    let classifier = UrlClassifier::new(&model, 20);

    let result = classifier.classify(&topics(3)).await;
    assert!(result.iter().all(|(_, class)| *class == Post));
    assert_eq!(model.prompts().len(), 1);
}

#[tokio::test]
async fn repeated_urls_are_asked_once() {
    let model = KeywordModel::new("topic0");
    let classifier = UrlClassifier::new(&model, 20);

    let urls = ["https://a.com/guide/topic0", "https://a.com/guide/topic0"];
    let result = classifier.classify(&urls).await;
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|(_, class)| *class == Seo));
    assert!(!model.prompts()[0].contains("\n2. "));
}

#[tokio::test]
async fn seo_filter_strips_pages_and_dedupes() {
    let model = KeywordModel::new("topic1");
    let classifier = UrlClassifier::new(&model, 20);

    let hit = |url: &str, title: &str| SearchHit::new(url, title, "", "a.com");
    let hits = vec![
        hit("https://a.com/", "home"),
        hit("https://a.com/?page=2", "home page 2"),
        hit("https://a.com/notice?page=3", "notice page 3"),
        hit("https://a.com/notice", "notice"),
        hit("https://a.com/mt/1", "post"),
        hit("https://a.com/guide/topic1", "topic"),
        hit("https://a.com/guide/topic2", "other topic"),
    ];

    let kept = classifier.filter_seo(&hits).await;
    let urls: Vec<&str> = kept.iter().map(|h| h.url.as_str()).collect();
    assert_eq!(urls, ["https://a.com/", "https://a.com/notice", "https://a.com/guide/topic1"]);
    assert_eq!(kept[1].title, "notice page 3");

    assert!(classifier.filter_seo(&[]).await.is_empty());
}
