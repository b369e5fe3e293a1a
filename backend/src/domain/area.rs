//! Area taxonomy
//!
//! Fixed business areas and their sub-areas. Not editable at runtime.

use serde::Serialize;

/// One business area with its ordered sub-areas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaConfig {
    pub key: &'static str,
    pub label: &'static str,
    pub subs: &'static [&'static str],
}

const AREAS: [AreaConfig; 7] = [
    AreaConfig {
        key: "Strategic Management",
        label: "Strategic Management",
        subs: &["Visi-Misi & Roadmap", "KPI Tahunan", "Proyek Strategis"],
    },
    AreaConfig {
        key: "Organizational & HR",
        label: "Organizational & HR",
        subs: &["Struktur Organisasi", "Data Karyawan", "Rekrutmen", "Pelatihan"],
    },
    AreaConfig {
        key: "Operations & Assets",
        label: "Operations & Assets",
        subs: &[
            "Aset Tetap",
            "Peralatan Produksi",
            "Perlengkapan Kantor",
            "Inventaris Habis Pakai",
            "Pemeliharaan Aset",
        ],
    },
    AreaConfig {
        key: "Marketing & Sales",
        label: "Marketing & Sales",
        subs: &["Campaign Aktif", "Leads Masuk", "Penjualan", "Retensi Pelanggan"],
    },
    AreaConfig {
        key: "Finance & Legal",
        label: "Finance & Legal",
        subs: &[
            "Cash Flow",
            "Laporan Keuangan",
            "Hutang & Piutang",
            "Pajak",
            "Legalitas Usaha & Kontrak",
        ],
    },
    AreaConfig {
        key: "Customer Service",
        label: "Customer Service",
        subs: &["Komplain", "Kepuasan Pelanggan", "Response Time"],
    },
    AreaConfig {
        key: "IT & Digital",
        label: "IT & Digital",
        subs: &["Website/App", "Keamanan Data", "Sistem Internal"],
    },
];

/// Read-only view over the configured areas
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaTaxonomy;

impl AreaTaxonomy {
    pub fn all(&self) -> &'static [AreaConfig] {
        &AREAS
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        AREAS.iter().map(|a| a.key)
    }

    pub fn find(&self, key: &str) -> Option<&'static AreaConfig> {
        AREAS.iter().find(|a| a.key == key)
    }

    /// Sub-areas offered for an area; empty for unknown keys
    pub fn sub_areas(&self, key: &str) -> &'static [&'static str] {
        self.find(key).map(|a| a.subs).unwrap_or(&[])
    }

    pub fn is_known_pair(&self, area: &str, sub_area: &str) -> bool {
        self.sub_areas(area).contains(&sub_area)
    }

    /// Area used when the dashboard rather than an area is active
    pub fn default_area(&self) -> &'static str {
        AREAS[0].key
    }
}
