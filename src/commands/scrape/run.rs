use super::*;

pub fn run(args: ScrapeArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));
    let last_updated = Local::now().format("%d.%m.%Y %H:%M:%S").to_string();
    let base_url = with_trailing_slash(&args.base_url);
    let provenance = Provenance {
        base_url: base_url.clone(),
        dataset_home: args.dataset_home.clone(),
        publisher: args.publisher.clone(),
    };

    info!(base_url = %base_url, run_id = %run_id, "starting scrape");

    let grammar =
        Grammar::new(default_statutes()).context("failed to compile statute grammar")?;
    let normalizer = CaseNumberNormalizer::new(&args.cross_reference_base);
    let assembler = ItemAssembler::new(&grammar, &normalizer);
    let fetcher = Fetcher::new(
        &args.cache_dir,
        Duration::from_secs(args.cache_ttl_secs),
        Duration::from_secs(args.timeout_secs),
    )
    .context("failed to set up fetcher")?;

    let mut misses = MissCounter::new();
    let scraped = scrape_pages(
        &fetcher,
        &assembler,
        &base_url,
        !args.skip_details,
        &mut misses,
    )?;
    check_item_count(scraped.items.len(), args.min_items)?;

    let dataset = Dataset {
        page_count: scraped.page_count,
        item_count: scraped.items.len(),
        last_updated,
        source_info: provenance.source_info(),
        items: scraped.items,
    };

    let outputs = write_outputs(&args.output_dir, &dataset, &provenance)?;

    let manifest = RunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        completed_at: now_utc_string(),
        base_url: base_url.clone(),
        page_count: dataset.page_count,
        item_count: dataset.item_count,
        details_fetched: !args.skip_details,
        miss_words: misses.len(),
        miss_total: misses.total(),
        outputs,
    };
    let manifest_path = args.output_dir.join(RUN_MANIFEST);
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote run manifest");

    info!(
        pages = dataset.page_count,
        items = dataset.item_count,
        miss_words = misses.len(),
        "scrape completed"
    );

    write_miss_report(&misses, args.miss_report_threshold)
}

pub(super) struct Scraped {
    pub page_count: usize,
    pub items: Vec<OpinionItem>,
}

/// Page 1 decides the page count; pages 2..=N follow in order.
fn scrape_pages(
    fetcher: &Fetcher,
    assembler: &ItemAssembler<'_>,
    base_url: &str,
    fetch_details: bool,
    misses: &mut MissCounter,
) -> Result<Scraped, ScrapeError> {
    let first = parse_listing(&fetcher.fetch(base_url, &cache_key_for_page(1))?)?;
    let page_count = first.page_count;
    info!(page_count, "read first listing page");

    let mut items = Vec::new();
    let mut page = first;
    let mut page_number = 1;
    loop {
        for entry in &page.entries {
            let body = if fetch_details {
                let html = fetcher.fetch(&entry.url, &cache_key_for_url(&entry.url))?;
                Some(parse_detail(&html)?)
            } else {
                None
            };

            items.push(assembler.assemble(
                &entry.footer_lines,
                &entry.title,
                &entry.description,
                body.as_deref(),
                &entry.url,
                misses,
            )?);
        }
        info!(
            page = page_number,
            entries = page.entries.len(),
            items = items.len(),
            "processed listing page"
        );

        page_number += 1;
        if page_number > page_count {
            break;
        }
        let url = listing_page_url(base_url, page_number);
        page = parse_listing(&fetcher.fetch(&url, &cache_key_for_page(page_number))?)?;
        if page.page_count != page_count {
            warn!(
                page = page_number,
                expected = page_count,
                found = page.page_count,
                "page count changed during scrape"
            );
        }
    }

    Ok(Scraped { page_count, items })
}

pub(super) fn check_item_count(found: usize, minimum: usize) -> Result<(), ScrapeError> {
    if found < minimum {
        return Err(ScrapeError::SanityCheck { found, minimum });
    }
    Ok(())
}

pub(super) fn listing_page_url(base_url: &str, page: usize) -> String {
    format!("{}page/{page}/", with_trailing_slash(base_url))
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

fn write_outputs(
    output_dir: &Path,
    dataset: &Dataset,
    provenance: &Provenance,
) -> Result<Vec<OutputFile>> {
    let json_path = output_dir.join(DATASET_JSON);
    write_json_pretty(&json_path, dataset)?;

    let csv_path = output_dir.join(DATASET_CSV);
    write_text(&csv_path, &render_csv(dataset, provenance))?;

    let html_path = output_dir.join(INDEX_HTML);
    write_text(&html_path, &render_index(dataset, provenance))?;

    let mut outputs = Vec::new();
    for path in [json_path, csv_path, html_path] {
        info!(path = %path.display(), "wrote output");
        outputs.push(OutputFile {
            sha256: sha256_file(&path)?,
            path: path.display().to_string(),
        });
    }

    Ok(outputs)
}
