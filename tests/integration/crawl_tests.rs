//! Integration tests for the harvester
//!
//! These tests use wiremock to serve the directory, faculty listing and thesis
//! pages and run the full pipeline end-to-end into a temporary directory.

use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use thesis_harvester::config::Config;
use thesis_harvester::crawler::{Coordinator, Selection};
use thesis_harvester::{HarvestError, OutputFormat};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing every page at the mock server
fn create_test_config(server: &MockServer, output: &Path) -> Config {
    let mut config = Config::default();
    config.source.directory_url = format!("{}/dipartimenti", server.uri());
    config.source.faculty_listing_url = format!("{}/{{code}}/docenti?pagesize=100000000", server.uri());
    config.client.timeout_secs = 5;
    config.client.log_visits = false;
    config.output.directory = output.to_path_buf();
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

fn faculty_card(server: &MockServer, name: &str, slug: &str, role: &str) -> String {
    format!(
        r#"<div class="item"><div class="text-wrap"><a href="{}/sitoweb/{}"> {} </a><p>{}</p></div></div>"#,
        server.uri(),
        slug,
        name,
        role
    )
}

async fn mount_directory(server: &MockServer, links: &[(&str, &str)]) {
    let anchors: String = links
        .iter()
        .map(|(href, name)| format!(r#"<p><a href="{}">{}</a></p>"#, href, name))
        .collect();

    Mock::given(method("GET"))
        .and(path("/dipartimenti"))
        .respond_with(html(format!(
            r#"<div class="description-text">{}</div>"#,
            anchors
        )))
        .mount(server)
        .await;
}

async fn mount_listing(server: &MockServer, code: &str, cards: &[String]) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/docenti", code)))
        .respond_with(html(format!(
            r#"<div class="picture-cards">{}</div>"#,
            cards.concat()
        )))
        .mount(server)
        .await;
}

async fn mount_theses(server: &MockServer, slug: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/sitoweb/{}/didattica", slug)))
        .and(query_param("tab", "tesi"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Serves the single-department fixture: DISI with A. Rossi proposing "Topic X"
async fn mount_disi_fixture(server: &MockServer) {
    mount_directory(server, &[("https://disi.unibo", "DISI")]).await;
    mount_listing(
        server,
        "disi",
        &[faculty_card(server, "A. Rossi", "a.rossi", "Professor")],
    )
    .await;
    mount_theses(
        server,
        "a.rossi",
        html(r#"<div class="inner-text">Topic X</div>"#.to_string()),
    )
    .await;
}

#[tokio::test]
async fn test_full_harvest_asciidoc() {
    let mock_server = MockServer::start().await;
    mount_disi_fixture(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    let config = create_test_config(&mock_server, &output);

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator
        .run(&Selection::Codes(vec!["disi".to_string()]))
        .await
        .expect("Harvest failed");

    assert!(report.is_success());
    assert_eq!(report.exit_status(), 0);
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].1, output.join("disi.adoc"));

    let document = std::fs::read_to_string(output.join("disi.adoc")).unwrap();
    assert!(document.starts_with("= Theses of DISI\n"));
    assert_eq!(document.matches("\n== ").count(), 1);
    assert!(document.contains("\n== A. Rossi\nProfessor | "));
    assert!(document.contains("\n=== Proposed\n\n==== All\n\n* Topic X\n"));
    assert!(document.ends_with("\n=== Assigned\n"));
}

#[tokio::test]
async fn test_full_harvest_latex() {
    let mock_server = MockServer::start().await;
    mount_disi_fixture(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    let mut config = create_test_config(&mock_server, &output);
    config.output.format = OutputFormat::Latex;

    let coordinator = Coordinator::new(config).unwrap();
    let report = coordinator
        .run(&Selection::Codes(vec!["disi".to_string()]))
        .await
        .unwrap();

    assert!(report.is_success());
    let document = std::fs::read_to_string(output.join("disi.tex")).unwrap();
    assert!(document.contains("\\title{Theses of DISI}"));
    assert!(document.contains("\\section{A. Rossi}"));
    assert!(document.contains("\\subsubsection{All}\n\\begin{itemize}\n \\item Topic X\n\\end{itemize}\n"));
    assert!(document.contains("\\subsection{Assigned}\n"));
    assert!(document.ends_with("\\end{document}\n"));
}

#[tokio::test]
async fn test_unknown_code_lists_available_departments() {
    let mock_server = MockServer::start().await;
    mount_disi_fixture(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    let coordinator = Coordinator::new(create_test_config(&mock_server, &output)).unwrap();

    let report = coordinator
        .run(&Selection::Codes(vec!["zzzz".to_string()]))
        .await
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.exit_status(), 1);
    assert_eq!(report.unresolved, vec!["zzzz"]);
    assert_eq!(report.available, vec!["disi — DISI"]);
    assert!(report.written.is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unknown_code_does_not_stop_known_ones() {
    let mock_server = MockServer::start().await;
    mount_disi_fixture(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    let coordinator = Coordinator::new(create_test_config(&mock_server, &output)).unwrap();

    let report = coordinator
        .run(&Selection::Codes(vec!["zzzz".to_string(), "disi".to_string()]))
        .await
        .unwrap();

    assert_eq!(report.unresolved, vec!["zzzz"]);
    assert_eq!(report.written.len(), 1);
    assert!(output.join("disi.adoc").exists());
}

#[tokio::test]
async fn test_failed_listing_does_not_stop_next_department() {
    let mock_server = MockServer::start().await;
    mount_directory(
        &mock_server,
        &[
            ("https://disi.unibo.it/it", "DISI"),
            ("https://difa.unibo.it/it", "DIFA"),
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/disi/docenti"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_listing(
        &mock_server,
        "difa",
        &[faculty_card(&mock_server, "C. Verdi", "c.verdi", "Researcher")],
    )
    .await;
    mount_theses(
        &mock_server,
        "c.verdi",
        html(r#"<div class="report-list"><h4>Master</h4><ul><li>Dark matter</li></ul></div>"#.to_string()),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    let coordinator = Coordinator::new(create_test_config(&mock_server, &output)).unwrap();

    let report = coordinator
        .run(&Selection::Codes(vec!["disi".to_string(), "difa".to_string()]))
        .await
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.exit_status(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "disi");
    assert!(report.failed[0].1.contains("500"));
    assert!(!output.join("disi.adoc").exists());

    let document = std::fs::read_to_string(output.join("difa.adoc")).unwrap();
    assert!(document.contains("==== Master\n\n* Dark matter\n"));
}

#[tokio::test]
async fn test_unwritable_output_fails_department() {
    let mock_server = MockServer::start().await;
    mount_disi_fixture(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    std::fs::write(&output, "not a directory").unwrap();
    let coordinator = Coordinator::new(create_test_config(&mock_server, &output)).unwrap();

    let report = coordinator
        .run(&Selection::Codes(vec!["disi".to_string()]))
        .await
        .expect("Save failures should not abort the run");

    assert!(report.written.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "disi");
    assert_eq!(report.exit_status(), 1);
}

#[tokio::test]
async fn test_page_text_reaches_document_intact() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server, &[("https://disi.unibo.it/it", "DISI")]).await;
    mount_listing(
        &mock_server,
        "disi",
        &[format!(
            r#"<div class="item"><div class="text-wrap">
                <a href="{}/sitoweb/mario.rossi">
                    <span>ROSSI</span>
                    <span>MARIO</span>
                </a>
                <p>Professore
                    ordinario</p>
            </div></div>"#,
            mock_server.uri()
        )],
    )
    .await;
    mount_theses(
        &mock_server,
        "mario.rossi",
        html(
            r#"<div class="report-list"><h4>Tesi
                    magistrali</h4><ul>
                <li>Proving a &lt; b implies b &gt; a</li>
                <li>Use of &amp;lt; in HTML</li>
            </ul></div>"#
                .to_string(),
        ),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");

    for format in [OutputFormat::AsciiDoc, OutputFormat::Latex] {
        let mut config = create_test_config(&mock_server, &output);
        config.output.format = format;
        let report = Coordinator::new(config)
            .unwrap()
            .run(&Selection::Codes(vec!["disi".to_string()]))
            .await
            .unwrap();
        assert!(report.is_success());
    }

    let asciidoc = std::fs::read_to_string(output.join("disi.adoc")).unwrap();
    assert!(asciidoc.contains("\n== ROSSI MARIO\nProfessore ordinario | "));
    assert!(asciidoc.contains("\n==== Tesi magistrali\n"));
    assert!(asciidoc.contains("* Proving a < b implies b > a\n"));
    assert!(asciidoc.contains("* Use of &lt; in HTML\n"));

    let latex = std::fs::read_to_string(output.join("disi.tex")).unwrap();
    assert!(latex.contains("\\section{ROSSI MARIO}\nProfessore ordinario | "));
    assert!(latex.contains("\\subsubsection{Tesi magistrali}\n"));
    assert!(latex.contains("\\item Proving a < b implies b > a\n"));
    assert!(latex.contains("\\item Use of \\&lt; in HTML\n"));
}

#[tokio::test]
async fn test_missing_profile_link_aborts_run() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server, &[("https://disi.unibo.it/it", "DISI")]).await;
    mount_listing(
        &mock_server,
        "disi",
        &[
            faculty_card(&mock_server, "A. Rossi", "a.rossi", "Professor"),
            r#"<div class="item"><div class="text-wrap"><a>B. Bianchi</a><p>Researcher</p></div></div>"#
                .to_string(),
        ],
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    let coordinator = Coordinator::new(create_test_config(&mock_server, &output)).unwrap();

    let err = coordinator
        .run(&Selection::Codes(vec!["disi".to_string()]))
        .await
        .unwrap_err();

    assert!(matches!(err, HarvestError::PageStructure { .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_changed_directory_aborts_run() {
    let mock_server = MockServer::start().await;
    mount_directory(
        &mock_server,
        &[
            ("https://disi.unibo.it/it", "DISI"),
            ("https://www.example.org/newsite", "Moved"),
        ],
    )
    .await;

    let dir = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&mock_server, dir.path())).unwrap();

    let departments = coordinator.departments().await;
    assert!(matches!(departments, Err(HarvestError::PageStructure { .. })));

    let err = coordinator.run(&Selection::All).await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_missing_thesis_page_yields_empty_sections() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server, &[("https://disi.unibo.it/it", "DISI")]).await;
    mount_listing(
        &mock_server,
        "disi",
        &[faculty_card(&mock_server, "A. Rossi", "a.rossi", "Professor")],
    )
    .await;
    // No thesis page mounted: the mock server answers 404

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site");
    let coordinator = Coordinator::new(create_test_config(&mock_server, &output)).unwrap();

    let members = coordinator
        .harvest_department(&coordinator.departments().await.unwrap()[0])
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0].theses.is_empty());

    let report = coordinator
        .run(&Selection::Codes(vec!["disi".to_string()]))
        .await
        .unwrap();
    assert!(report.is_success());

    let document = std::fs::read_to_string(output.join("disi.adoc")).unwrap();
    assert!(document.contains("== A. Rossi\n"));
    assert!(document.contains("=== Proposed\n\n=== Assigned\n"));
}

#[tokio::test]
async fn test_listing_timeout_is_reported() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server, &[("https://disi.unibo.it/it", "DISI")]).await;
    Mock::given(method("GET"))
        .and(path("/disi/docenti"))
        .respond_with(html(String::new()).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, dir.path());
    config.client.timeout_secs = 1;
    let coordinator = Coordinator::new(config).unwrap();

    let report = coordinator
        .run(&Selection::Codes(vec!["disi".to_string()]))
        .await
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].1.contains("timeout"));
}

#[tokio::test]
async fn test_concurrent_fetch_keeps_listing_order() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server, &[("https://disi.unibo.it/it", "DISI")]).await;

    let names = ["A. Rossi", "B. Bianchi", "C. Verdi", "D. Neri", "E. Gialli"];
    let cards: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| faculty_card(&mock_server, name, &format!("member{}", i), "Professor"))
        .collect();
    mount_listing(&mock_server, "disi", &cards).await;

    for (i, name) in names.iter().enumerate() {
        // Earlier members answer later so completion order is reversed
        let delay = Duration::from_millis(50 * (names.len() - i) as u64);
        mount_theses(
            &mock_server,
            &format!("member{}", i),
            html(format!(r#"<div class="inner-text">Topic of {}</div>"#, name)).set_delay(delay),
        )
        .await;
    }

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, dir.path());
    config.client.concurrency = 3;
    let coordinator = Coordinator::new(config).unwrap();

    let department = coordinator.departments().await.unwrap().remove(0);
    let members = coordinator.harvest_department(&department).await.unwrap();

    let listed: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(listed, names);
    for member in &members {
        assert_eq!(
            member.theses.proposed[0].items,
            vec![format!("Topic of {}", member.name)]
        );
    }
}

#[tokio::test]
async fn test_all_departments_sorted_by_code() {
    let mock_server = MockServer::start().await;
    mount_directory(
        &mock_server,
        &[
            ("https://disi.unibo.it/it", "DISI"),
            ("https://da.unibo.it/it", "Architettura"),
        ],
    )
    .await;
    mount_listing(&mock_server, "disi", &[]).await;
    mount_listing(&mock_server, "da", &[]).await;

    let dir = TempDir::new().unwrap();
    let coordinator = Coordinator::new(create_test_config(&mock_server, dir.path())).unwrap();

    let report = coordinator.run(&Selection::All).await.unwrap();

    let codes: Vec<&str> = report.written.iter().map(|(code, _)| code.as_str()).collect();
    assert_eq!(codes, vec!["da", "disi"]);
    assert_eq!(report.available, vec!["da — Architettura", "disi — DISI"]);
}
