use super::*;

const CROSS_REFERENCE_BASE: &str = "https://norske-postlister.no/sak/sivilombudsmannen";

fn footer(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn sample_item() -> OpinionItem {
    let grammar = Grammar::new(default_statutes()).expect("default statute table should compile");
    let normalizer = CaseNumberNormalizer::new(CROSS_REFERENCE_BASE);
    let assembler = ItemAssembler::new(&grammar, &normalizer);
    let mut misses = MissCounter::new();

    assembler
        .assemble(
            &footer(&[
                "Dato for uttalelse: 01.03.2021",
                "Saksnummer: 2020/4511 og 2021/17",
                "Publisert: 15.03.2021",
            ]),
            "Innsyn etter offentleglova § 3; klage <avvist>",
            "Forvaltningsloven § 2 første ledd",
            None,
            "https://www.sivilombudet.no/uttalelser/innsyn-i-epost/",
            &mut misses,
        )
        .expect("sample footer should assemble")
}

fn sample_provenance() -> Provenance {
    Provenance {
        base_url: "https://www.sivilombudet.no/uttalelser/".to_string(),
        dataset_home: "https://hnygard.github.io/sivilombudet-uttalelser/".to_string(),
        publisher: "@hallny / Norske-postlister.no".to_string(),
    }
}

fn sample_dataset() -> Dataset {
    Dataset {
        page_count: 1,
        item_count: 1,
        last_updated: "19.10.2026 08:30:00".to_string(),
        source_info: sample_provenance().source_info(),
        items: vec![sample_item()],
    }
}

#[test]
fn csv_starts_with_provenance_and_header() {
    let csv = render_csv(&sample_dataset(), &sample_provenance());
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "Datasett hentet fra;https://hnygard.github.io/sivilombudet-uttalelser/;\
         @hallny / Norske-postlister.no;Kilde;https://www.sivilombudet.no/uttalelser/;\
         Data hentet;19.10.2026 08:30:00"
    );
    assert_eq!(
        lines[1],
        "Dato - uttalelse;Dato - publisert;Saksnummer;Lenke uttalelse;Lovreferanse;Tittel"
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn csv_row_uses_case_labels_and_strips_semicolons() {
    let csv = render_csv(&sample_dataset(), &sample_provenance());
    let row = csv.lines().nth(2).expect("one item row");

    assert_eq!(
        row,
        "01.03.2021;15.03.2021;SM-2020/4511, SM-2021/17;\
         https://www.sivilombudet.no/uttalelser/innsyn-i-epost/;\
         forvaltningsloven § 2 første ledd, offentleglova § 3;\
         Innsyn etter offentleglova § 3: klage <avvist>"
    );
    assert_eq!(row.split(';').count(), 6);
}

#[test]
fn index_links_cases_and_escapes_title() {
    let html = render_index(&sample_dataset(), &sample_provenance());

    assert!(html.contains("<li>Antall uttalelser: 1</li>"));
    assert!(html.contains("Laget av @hallny / Norske-postlister.no<br>"));
    assert!(html.contains(
        r#"<a href="https://norske-postlister.no/sak/sivilombudsmannen/2020/4511">SM-2020/4511</a>"#
    ));
    assert!(html.contains(
        "<td class=\"law-ref\">forvaltningsloven § 2 første ledd<br>\noffentleglova § 3</td>"
    ));
    assert!(html.contains("Innsyn etter offentleglova § 3; klage &lt;avvist&gt;"));
    assert!(html.contains(r#"<input id="law-filter" type="text">"#));
    assert!(html.contains("getElementById('law-filter')"));
    assert!(html.contains(&format!(r#"<a href="./{DATASET_JSON}">"#)));
}

#[test]
fn dataset_json_uses_published_field_names() {
    let value = serde_json::to_value(sample_dataset()).expect("dataset serializes");

    assert_eq!(value["pageCount"], 1);
    assert_eq!(value["itemCount"], 1);
    assert_eq!(value["lastUpdated"], "19.10.2026 08:30:00");
    assert_eq!(
        value["sourceInfo"],
        "Datasett hentet fra https://hnygard.github.io/sivilombudet-uttalelser/, \
         laget av @hallny / Norske-postlister.no. Kilde: https://www.sivilombudet.no/uttalelser/"
    );

    let item = &value["items"][0];
    assert_eq!(item["datoUttalelse"], "01.03.2021");
    assert_eq!(item["datoPublisert"], "15.03.2021");
    assert_eq!(item["sivilombudetSaksnummer"], "2020/4511 og 2021/17");
    assert_eq!(item["tittel_lovRef"], serde_json::json!(["offentleglova § 3"]));
    assert_eq!(
        item["beskrivelse_lovRef"],
        serde_json::json!(["forvaltningsloven § 2 første ledd"])
    );
    assert_eq!(item["uttalelse_lovRef"], serde_json::json!([]));
    assert_eq!(
        item["url-norske-postlister.no"]["2021/17"],
        "https://norske-postlister.no/sak/sivilombudsmannen/2021/17"
    );
    assert!(item.get("uttalelse").is_none());
}

#[test]
fn too_few_items_fail_the_sanity_check() {
    let err = check_item_count(999, 1000).expect_err("below minimum");

    assert!(matches!(
        err,
        ScrapeError::SanityCheck {
            found: 999,
            minimum: 1000
        }
    ));
    assert!(check_item_count(1000, 1000).is_ok());
}

#[test]
fn listing_page_url_appends_page_path() {
    assert_eq!(
        listing_page_url("https://www.sivilombudet.no/uttalelser/", 2),
        "https://www.sivilombudet.no/uttalelser/page/2/"
    );
    assert_eq!(
        listing_page_url("https://www.sivilombudet.no/uttalelser", 12),
        "https://www.sivilombudet.no/uttalelser/page/12/"
    );
}
