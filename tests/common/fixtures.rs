//! Static keyword corpora and on-disk fixtures used across harnesses.

use fake::faker::lorem::en::Words;
use fake::Fake;
use keyscout::config::Config;
use keyscout::Explorer;
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small export in the legacy `KW,Volumn,KD` layout.
pub const CSV_LEGACY: &str = "\
KW,Volumn,KD
running shoes – apparel,100K-1M,55
trail running shoes,10K-100K,41
shoe rack,1M-10M,12
sandals,,8
running shoes,na,60
";

/// The same shape with canonical column names and extra columns.
pub const CSV_CANONICAL: &str = "\
rank,volume,keyword,value,cpc
1,100K-1M,coffee grinder,70,1.20
2,1M-10M,espresso machine,82,2.10
3,10K-100K,pour over kettle,35,0.80
";

/// Unrecognized headers; columns are taken by position.
pub const CSV_POSITIONAL: &str = "\
a,b,c
alpha,10K-100K,1
beta,100K-1M,2
";

/// Only two unrecognized columns: cannot be resolved.
pub const CSV_UNRESOLVABLE: &str = "\
foo,bar
x,y
";

/// Write `body` to `dir/name` and return the path.
pub fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// Write a legacy CSV with `n` synthetic rows.
pub fn write_synthetic_csv(dir: &TempDir, name: &str, n: usize) -> PathBuf {
    let mut body = String::from("KW,Volumn,KD\n");
    for i in 0..n {
        let words: Vec<String> = Words(1..4).fake();
        let volume = ["10K-100K", "100K-1M", "1M-10M", ""][i % 4];
        body.push_str(&format!("{} {i},{volume},{}\n", words.join(" "), i % 100));
    }
    write_file(dir, name, &body)
}

/// An [`Explorer`] over `body` written as `keywords.csv`, with its saved
/// lists in the same directory.
pub fn explorer_over(dir: &TempDir, body: &str) -> Explorer {
    let mut config = Config::defaults();
    config.data.dataset_path = write_file(dir, "keywords.csv", body);
    config.data.saved_lists_path = dir.path().join("saved_lists.json");
    Explorer::open(config).unwrap()
}

/// One worksheet row: keyword, optional volume text, numeric value.
pub type SheetRow<'a> = (&'a str, Option<&'a str>, f64);

/// Write a workbook with one `KW,Volumn,KD` worksheet per entry, in order.
/// `None` volumes are left as empty cells; values are stored as numbers.
pub fn write_workbook(dir: &TempDir, name: &str, sheets: &[(&str, &[SheetRow])]) -> PathBuf {
    let mut workbook = Workbook::new();
    for (sheet_name, rows) in sheets {
        let sheet = workbook.add_worksheet().set_name(*sheet_name).unwrap();
        for (col, header) in ["KW", "Volumn", "KD"].into_iter().enumerate() {
            sheet.write_string(0, col as u16, header).unwrap();
        }
        for (i, (keyword, volume, value)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *keyword).unwrap();
            if let Some(volume) = volume {
                sheet.write_string(row, 1, *volume).unwrap();
            }
            sheet.write_number(row, 2, *value).unwrap();
        }
    }
    let path = dir.path().join(name);
    workbook.save(&path).unwrap();
    path
}

/// Two quarters of keywords, one worksheet each.
pub fn write_quarterly_workbook(dir: &TempDir) -> PathBuf {
    let q1: &[SheetRow] = &[
        ("seo tools", Some("10K-100K"), 40.0),
        ("blank row kw", None, 7.5),
        ("na kw", Some("NA"), 12.0),
    ];
    let q2: &[SheetRow] = &[("coffee", None, 3.0)];
    write_workbook(dir, "quarters.xlsx", &[("Q1", q1), ("Q2", q2)])
}
