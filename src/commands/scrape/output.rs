use std::io::{self, Write};

use super::*;

const CSV_HEADER: &str =
    "Dato - uttalelse;Dato - publisert;Saksnummer;Lenke uttalelse;Lovreferanse;Tittel";

const INDEX_STYLE: &str = r#"<style>
table th {
	text-align: left;
	max-width: 300px;
	border: 1px solid lightgrey;
	padding: 2px;
	white-space: nowrap;
}
table td {
	text-align: left;
	border: 1px solid lightgrey;
	padding: 2px;
	white-space: nowrap;
}
table {
	border-collapse: collapse;
}
table tr.not-matching-law {
	display: none;
}
</style>"#;

// Hides rows whose law-ref cell does not match the typed statute reference.
const FILTER_SCRIPT: &str = r#"<script>
	var timeout;
	document.getElementById('law-filter').onkeyup = function() {
		var search = this.value;
		clearTimeout(timeout);
		timeout = setTimeout(function() {
			var trs = document.getElementsByTagName('tr');
			for (var i = 1; i < trs.length; i++) {
				var tr = trs[i];
				var notes = tr.querySelector('td.law-ref');
				if (notes !== null) {
					var patt = new RegExp(search + '[^0-9]', 'g');
					if (search == '' || patt.test(notes.innerHTML)) {
						tr.className = 'matching-law';
					}
					else {
						tr.className = 'not-matching-law';
					}
				}
			}
		}, 250);
	};
</script>"#;

/// Semicolons in free text would shift the CSV columns.
fn csv_field(text: &str) -> String {
    text.replace(';', ":")
}

fn case_labels(item: &OpinionItem) -> Vec<String> {
    item.case_references
        .iter()
        .map(|reference| format!("SM-{}", reference.id))
        .collect()
}

pub(super) fn render_csv(dataset: &Dataset, provenance: &Provenance) -> String {
    let mut csv = format!(
        "Datasett hentet fra;{};{};Kilde;{};Data hentet;{}\n{CSV_HEADER}\n",
        csv_field(&provenance.dataset_home),
        csv_field(&provenance.publisher),
        csv_field(&provenance.base_url),
        dataset.last_updated
    );

    for item in &dataset.items {
        let row = [
            item.opinion_date_display(),
            item.published_date_display(),
            csv_field(&case_labels(item).join(", ")),
            csv_field(&item.url),
            csv_field(&item.merged_citations().join(", ")),
            csv_field(&item.title),
        ];
        csv.push_str(&row.join(";"));
        csv.push('\n');
    }

    csv
}

pub(super) fn render_index(dataset: &Dataset, provenance: &Provenance) -> String {
    let base_url = escape_html(&provenance.base_url);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>Sivilombudets uttalelser</title>\n</head>\n<body>\n{INDEX_STYLE}\n\n<h1>Sivilombudets uttalelser</h1>\n"
    );

    html.push_str(&format!(
        "Laget av {}<br>\n<a href=\"{}\">{}</a><br>\n",
        escape_html(&provenance.publisher),
        escape_html(&provenance.dataset_home),
        escape_html(&provenance.dataset_home),
    ));
    html.push_str(&format!(
        r#"
<ul>
	<li>Antall uttalelser: {item_count}</li>
	<li>Liste sist oppdatert: {last_updated}</li>
	<li>Kilde: <a href="{base_url}">{base_url}</a></li>
	<li>JSON-format: <a href="./{DATASET_JSON}">{DATASET_JSON}</a></li>
	<li>CSV-format (Excel): <a href="./{DATASET_CSV}">{DATASET_CSV}</a></li>
</ul>

<table>
	<thead>
		<tr>
			<th>Dato - uttalelse (publisert)</th>
			<th>Saksnummer</th>
			<th>Uttalelse</th>
			<th>
				Referanser til lov<br>
				<input id="law-filter" type="text"> - Filter
			</th>
			<th>Tittel</th>
		</tr>
	</thead>
"#,
        item_count = dataset.item_count,
        last_updated = escape_html(&dataset.last_updated),
    ));

    for item in &dataset.items {
        let case_links: Vec<String> = item
            .case_references
            .iter()
            .map(|reference| {
                format!(
                    r#"<a href="{}">SM-{}</a>"#,
                    escape_html(&reference.url),
                    escape_html(&reference.id)
                )
            })
            .collect();
        let citations: Vec<String> = item
            .merged_citations()
            .iter()
            .map(|citation| escape_html(citation))
            .collect();

        html.push_str(&format!(
            r#"
	<tr>
		<th>{} <span style="font-weight: normal;">({})</span></th>
		<td>{}</td>
		<td>[<a href="{}">Til uttalelse</a>]</td>
		<td class="law-ref">{}</td>
		<td>{}</td>
	</tr>
"#,
            item.opinion_date_display(),
            item.published_date_display(),
            case_links.join(",<br>\n"),
            escape_html(&item.url),
            citations.join("<br>\n"),
            escape_html(&item.title),
        ));
    }

    html.push_str("\n</table>\n\n");
    html.push_str(FILTER_SCRIPT);
    html.push_str("\n</body>\n</html>\n");
    html
}

/// Prints frequent unmatched words as ready-to-paste alias table lines.
pub(super) fn write_miss_report(misses: &MissCounter, threshold: usize) -> Result<()> {
    let report = misses.report(threshold);
    info!(
        threshold,
        words = report.len(),
        "words in front of unmatched section marks"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    for (word, count) in report {
        writeln!(output, "// {count}")?;
        writeln!(output, "{word:?},")?;
    }
    output.flush()?;
    Ok(())
}
