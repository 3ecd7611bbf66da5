// tests/scrape_e2e.rs
use marathon_scrape::{
    AgeGroup, Rank,
    config::{AppOptions, ExportFormat},
    core::net::StaticSource,
    progress::Progress,
    runner, scrape,
    store,
};

const BASE: &str = "http://results.test";

fn page(lines: &[&str]) -> String {
    format!(
        "<html><head><title>Zürich Marathon</title></head><body><pre>\
         <font size=\"2\">Kat  Rang Name              Jg   Ort          Zeit\n{}</font>\
         </pre></body></html>",
        lines.join("\n")
    )
}

fn url(year: i32, letter: char) -> String {
    format!("{BASE}/{year}/lauf/zuerich/alfa{letter}.htm")
}

fn source() -> StaticSource {
    StaticSource::new()
        .with_page(url(2019, 'a'), page(&[
            "M20  12. Ammann Peter      1992 Zürich       2:58.41,2  1:29.10,0  (11)",
            "W40   3. Arnold Sandra     1977 Winterthur   3:12.05,7  1:35.20,1  (12)",
        ]))
        .with_page(url(2019, 'b'), page(&[
            "M50 DNF Baumann Kurt      1962 Luzern       -  (13)",
        ]))
        .with_page(url(2022, 'a'), page(&[
            "M20   1. Aebi Lukas        2000 Bern         2:31.00,0  1:15.00,0  (14)",
            "M20   2. Alder Jonas       ???? Basel        2:35.00,0  1:16.00,0  (15)",
        ]))
}

fn opts(dir: &std::path::Path) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.base_url = BASE.into();
    opts.scrape.years = vec![2022, 2019];
    opts.scrape.letters = "abc".into();
    opts.export.out_dir = dir.to_path_buf();
    opts
}

#[derive(Default)]
struct Counting {
    total: usize,
    pages: usize,
    finished: bool,
}

impl Progress for Counting {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, _url: &str, _rows: usize) { self.pages += 1; }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn one_record_per_listed_runner_with_known_age() {
    let tmp = tempfile::tempdir().unwrap();
    let mut progress = Counting::default();
    let (ds, summary) = scrape::collect_results(&opts(tmp.path()).scrape, &source(), Some(&mut progress)).unwrap();

    // 5 runner lines, one without a birth year
    assert_eq!(summary.lines_parsed, 5);
    assert_eq!(summary.dropped_age, 1);
    assert_eq!(ds.len(), 4);
    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.pages_missing, 3);

    assert_eq!(progress.total, 6);
    assert_eq!(progress.pages, 6);
    assert!(progress.finished);

    // Sorted by year first
    let years: Vec<i32> = ds.rows.iter().map(|r| r.run_year).collect();
    assert_eq!(years, vec![2019, 2019, 2019, 2022]);

    let kurt = ds.rows.iter().find(|r| r.fullname == "Baumann Kurt").unwrap();
    assert_eq!(kurt.rank, Rank::Dnf);
    assert_eq!(kurt.total_time, None);
    assert_eq!(kurt.age_group, AgeGroup::Over50);
    assert_eq!(kurt.run_link, url(2019, 'b'));

    let lukas = ds.rows.iter().find(|r| r.fullname == "Aebi Lukas").unwrap();
    assert_eq!(lukas.age(), 22);
    assert_eq!(lukas.age_group, AgeGroup::From20To30);
    assert_eq!(lukas.total_time.unwrap().to_string(), "2:31:00.0");
}

#[test]
fn run_writes_csv_and_sqlite() {
    let tmp = tempfile::tempdir().unwrap();
    let mut opts = opts(tmp.path());
    opts.export.sqlite = Some(tmp.path().join("runners.db"));

    let summary = runner::run_with(&opts, &source(), None).unwrap();
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.files_written.len(), 2);

    let csv_path = tmp.path().join("runners.csv");
    assert!(csv_path.is_file());
    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert!(text.starts_with("Category,Rang,Fullname,Age_year,Location,total_time,run_link,run_year,age_group"));

    let from_csv = store::load_dataset(&csv_path, "runners").unwrap();
    let from_db = store::load_dataset(&tmp.path().join("runners.db"), "runners").unwrap();
    assert_eq!(from_csv, from_db);
    assert_eq!(from_csv.len(), 4);
}

#[test]
fn tsv_format_changes_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let mut opts = opts(tmp.path());
    opts.export.format = ExportFormat::Tsv;

    let summary = runner::run_with(&opts, &source(), None).unwrap();
    assert_eq!(summary.files_written, vec![tmp.path().join("runners.tsv")]);
}

#[test]
fn empty_year_fails_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut opts = opts(tmp.path());
    opts.scrape.years = vec![2019, 2023];

    let err = runner::run_with(&opts, &source(), None).unwrap_err();
    assert!(err.to_string().contains("2023"), "{err}");
    assert!(!tmp.path().join("runners.csv").exists());
}
