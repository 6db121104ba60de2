// tests/storage_fs.rs
// End-to-end run against the filesystem storage layout.
use async_trait::async_trait;
use google_trends_scraper::error::Result;
use google_trends_scraper::storage::{FsDataset, FsKeyValueStore};
use google_trends_scraper::{run_once, RunInput, TrendsFetcher};
use serde_json::{json, Value};
use std::fs;

struct FixtureFetcher(&'static str);

#[async_trait]
impl TrendsFetcher for FixtureFetcher {
    async fn fetch_text(&self, _url: &str, _extra: &[(String, String)]) -> Result<String> {
        Ok(self.0.to_string())
    }
    fn name(&self) -> &'static str {
        "fixture"
    }
}

const DAILY: &str = r#")]}',
{"default":{"trendingSearchesDays":[
  {"date":"20240102","trendingSearches":[
    {"title":{"query":"first"},"image":{"source":"Src"},
     "articles":[{"title":"A","url":"https://a.test","source":"S","timeAgo":"1h ago","snippet":"s","image":{"imageUrl":"ia"}}]},
    {"title":{"query":"second"}}
  ]},
  {"formattedDate":"Monday, January 1, 2024","trendingSearches":[{"title":{"query":"third"}}]}
]}}"#;

fn read_json(p: std::path::PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(p).unwrap()).unwrap()
}

#[tokio::test]
async fn runs_append_and_summary_is_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let ds = FsDataset::open_default(tmp.path());
    let kv = FsKeyValueStore::open_default(tmp.path());
    let fetcher = FixtureFetcher(DAILY);
    let input = RunInput {
        mode: "daily".into(),
        ..RunInput::default()
    };

    run_once(input.clone(), &fetcher, &ds, &kv).await.unwrap();
    run_once(input, &fetcher, &ds, &kv).await.unwrap();

    let dir = tmp.path().join("datasets/default");
    let count = fs::read_dir(&dir).unwrap().count();
    assert_eq!(count, 6, "second run appends, it does not overwrite");

    let first = read_json(dir.join("000000001.json"));
    assert_eq!(first["type"], json!("daily"));
    assert_eq!(first["title"], json!("first"));
    assert_eq!(first["image"], json!("Src"));
    assert_eq!(first["articlesCount"], json!(1));
    assert_eq!(first["articles"][0]["timeAgo"], json!("1h ago"));
    assert_eq!(first["_raw"]["title"]["query"], json!("first"));

    let third = read_json(dir.join("000000003.json"));
    assert_eq!(third["date"], json!("Monday, January 1, 2024"));
    assert_eq!(read_json(dir.join("000000006.json"))["title"], json!("third"));

    let out = read_json(tmp.path().join("key_value_stores/default/OUTPUT.json"));
    assert_eq!(out["itemCount"], json!(3));
    assert_eq!(out["geo"], json!("TR"));
}
