use super::StatuteEntry;

/// Statutes recognized in opinion text, in matching order.
///
/// Order matters: an alias that is a suffix of a longer alias in another
/// entry (`forskriften` vs. `utlendingsforskriften`) must come after it, since
/// the longer alias consumes the citation first.
pub fn default_statutes() -> Vec<StatuteEntry> {
    vec![
        StatuteEntry::new(&["forvaltningsloven", "fvl.", "forvaltningsloven (fvl.)"])
            .with_name("Lov om behandlingsmåten i forvaltningssaker (forvaltningsloven)")
            .with_short_name("forvaltningsloven")
            .with_link("https://lovdata.no/dokument/NL/lov/1967-02-10"),
        StatuteEntry::new(&["offentleglova", "offentlighetsloven", "offentlighetslov"])
            .with_name("Lov om rett til innsyn i dokument i offentleg verksemd (offentleglova)")
            .with_short_name("offentleglova")
            .with_link("https://lovdata.no/dokument/NL/lov/2006-05-19-16"),
        StatuteEntry::new(&["opplæringslova"])
            .with_name("Lov om grunnskolen og den vidaregåande opplæringa (opplæringslova)")
            .with_link("https://lovdata.no/dokument/NL/lov/1998-07-17-61"),
        StatuteEntry::new(&["eigedomsskattelova"])
            .with_name("Lov om eigedomsskatt til kommunane (eigedomsskattelova)")
            .with_link("https://lovdata.no/dokument/NL/lov/1975-06-06-29"),
        StatuteEntry::new(&[
            "plan- og bygningsloven",
            "plan- og bygningsloven (plbl.)",
            "plbl.",
        ])
        .with_name("Lov om planlegging og byggesaksbehandling (plan- og bygningsloven)")
        .with_short_name("plan- og bygningsloven")
        .with_link("https://lovdata.no/dokument/NL/lov/2008-06-27-71"),
        StatuteEntry::new(OTHER_STATUTES),
    ]
}

// Statutes cited often enough to show up in the miss report. Emitted as
// written, no short name.
const OTHER_STATUTES: &[&str] = &[
    "voldsoffererstatningsloven",
    "voldsoffererstatningsforskriften",
    "voel.",
    "voldsofferstatningsloven",
    "sosialtjenesteloven",
    "politiregisterloven",
    "politiregisterforskriften",
    "konsesjonsloven",
    "pasient- og brukerrettighetsloven",
    "utlendingsloven",
    "utlendingsforskriften",
    "utlendingsforskrift",
    "inkassoloven",
    "inkassoforskriftens",
    "vegtrafikkloven",
    "sivilombudsmannsloven",
    "sivilombudsmannen",
    "sivilombudet",
    "ombudsmannsloven",
    "sivilombudsmannsinstruksen",
    "kommuneloven",
    "forskrift om parkeringstillatelse for forflytningshemmede",
    "psykisk helsevernloven",
    "helsepersonelloven",
    "pasientreiseforskriften",
    "spesialisthelsetjenesteloven",
    "barnehageloven",
    "vergemålsloven",
    "grunnloven",
    "dimensjoneringsforskriften",
    "folketrygdloven",
    "merverdiavgiftsloven",
    "vergemålsforskriften",
    "kulturminneloven",
    "forurensningsloven",
    "skatteloven",
    "universitetsloven",
    "straffegjennomføringsloven",
    "legemiddelloven",
    "ligningsloven",
    "tinglysingsloven",
    "særavgiftsforskriften",
    "strukturkvoteforskriften",
    "finnmarksloven",
    "dokumentavgiftsloven",
    "barnelova",
    "barneloven",
    "forskrift om arbeidsmarkedstiltak",
    "produktkontrolloven",
    "forsvarspersonelloven",
    "børsloven",
    "reindriftsloven",
    "barnevernloven",
    "offentlegforskrifta",
    "trafikkopplæringsforskriften",
    "konkurranseloven",
    "delingsloven",
    "arbeidsmiljøloven",
    "yrkesbefalloven",
    "yrkeskadeforsikringsloven",
    "yrkesskadeforsikringsloven",
    "yrkestransporforskriften",
    "yrkestransportforskriften",
    "yrkestransportlova",
    "yrkestransportloven",
    "våpenloven",
    "våpenforskriften",
    "viltloven",
    "trossamfunnsloven",
    "opplæringsforskriften",
    "oppll",
    "opplæringsloven",
    "pasientjournalloven",
    "pasientrettighetsloven",
    "pasientskadeloven",
    "passloven",
    "omsorgstjenesteloven",
    "naturmangfoldloven",
    "naturskadeloven",
    "nav-loven",
    "kommunehelsetjenesteloven",
    "politiloven",
    "statsborgerloven",
    "straffeprosessloven",
    "allmennaksjeloven",
    "aksjeloven",
    "miljøinformasjonsloven",
    "vannressursloven",
    "trygderettsloven",
    "straffeloven",
    "sivilombudsloven",
    "merverdiavgiftsforskriften",
    "kraftberedskapsforskriften",
    "(vannressursloven)",
    "arkivforskrifta",
    "arkivforskriften",
    "arkivlova",
    "beskyttelsesinstruksen",
    "damsikkerhetsforskriften",
    "forvaltningslov",
    "forvaltningslovforskriften",
    "helsevernforskriften",
    "(arkivforskriften)",
    // Suffix of most regulation names above; keep last. `helsevernforskriften § 4`
    // is then reported under its own name, not as `forskriften § 4`.
    "forskriften",
];
