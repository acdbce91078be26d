//! Listed instruments the synthetic feed generates records for.

/// Symbol, company name and sector of one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
}

const fn listing(symbol: &'static str, name: &'static str, sector: &'static str) -> Listing {
    Listing { symbol, name, sector }
}

/// Liquid IDX names across the main sectors.
pub const IDX_UNIVERSE: &[Listing] = &[
    listing("BBCA", "Bank Central Asia", "Banking"),
    listing("BBRI", "Bank Rakyat Indonesia", "Banking"),
    listing("BMRI", "Bank Mandiri", "Banking"),
    listing("BBNI", "Bank Negara Indonesia", "Banking"),
    listing("BRIS", "Bank Syariah Indonesia", "Banking"),
    listing("ARTO", "Bank Jago", "Banking"),
    listing("BTPS", "Bank BTPN Syariah", "Banking"),
    listing("MEGA", "Bank Mega", "Banking"),
    listing("NISP", "Bank OCBC NISP", "Banking"),
    listing("BNGA", "Bank CIMB Niaga", "Banking"),
    listing("TLKM", "Telkom Indonesia", "Telecom"),
    listing("EXCL", "XL Axiata", "Telecom"),
    listing("ISAT", "Indosat Ooredoo", "Telecom"),
    listing("FREN", "Smartfren Telecom", "Telecom"),
    listing("ASII", "Astra International", "Automotive"),
    listing("AUTO", "Astra Otoparts", "Automotive"),
    listing("SMSM", "Selamat Sempurna", "Automotive"),
    listing("UNVR", "Unilever Indonesia", "Consumer"),
    listing("ICBP", "Indofood CBP", "Consumer"),
    listing("INDF", "Indofood Sukses", "Consumer"),
    listing("MYOR", "Mayora Indah", "Consumer"),
    listing("KLBF", "Kalbe Farma", "Healthcare"),
    listing("SIDO", "Sido Muncul", "Healthcare"),
    listing("DVLA", "Darya Varia", "Healthcare"),
    listing("KAEF", "Kimia Farma", "Healthcare"),
    listing("PYFA", "Pyridam Farma", "Healthcare"),
    listing("GGRM", "Gudang Garam", "Tobacco"),
    listing("HMSP", "HM Sampoerna", "Tobacco"),
    listing("GOTO", "GoTo Gojek Tokopedia", "Technology"),
    listing("BUKA", "Bukalapak", "Technology"),
    listing("EMTK", "Elang Mahkota", "Technology"),
    listing("MTDL", "Metrodata Electronics", "Technology"),
    listing("ANTM", "Aneka Tambang", "Mining"),
    listing("INCO", "Vale Indonesia", "Mining"),
    listing("PTBA", "Bukit Asam", "Mining"),
    listing("ADRO", "Adaro Energy", "Mining"),
    listing("ITMG", "Indo Tambangraya", "Mining"),
    listing("MDKA", "Merdeka Copper Gold", "Mining"),
    listing("AMMN", "Amman Mineral", "Mining"),
    listing("TINS", "Timah", "Mining"),
    listing("MEDC", "Medco Energi", "Energy"),
    listing("PGAS", "Perusahaan Gas Negara", "Energy"),
    listing("AKRA", "AKR Corporindo", "Energy"),
    listing("JSMR", "Jasa Marga", "Infrastructure"),
    listing("WIKA", "Wijaya Karya", "Infrastructure"),
    listing("PTPP", "PP Persero", "Infrastructure"),
    listing("WSKT", "Waskita Karya", "Infrastructure"),
    listing("CPIN", "Charoen Pokphand", "Poultry"),
    listing("JPFA", "Japfa Comfeed", "Poultry"),
    listing("MAIN", "Malindo Feedmill", "Poultry"),
    listing("ACES", "Ace Hardware", "Retail"),
    listing("ERAA", "Erajaya Swasembada", "Retail"),
    listing("MAPI", "Mitra Adiperkasa", "Retail"),
    listing("LPPF", "Matahari Dept Store", "Retail"),
    listing("RALS", "Ramayana Lestari", "Retail"),
    listing("SMGR", "Semen Indonesia", "Cement"),
    listing("INTP", "Indocement", "Cement"),
    listing("SMCB", "Solusi Bangun Indonesia", "Cement"),
    listing("BRPT", "Barito Pacific", "Chemical"),
    listing("TPIA", "Chandra Asri", "Chemical"),
    listing("INKP", "Indah Kiat Pulp", "Paper"),
    listing("TKIM", "Pabrik Kertas Tjiwi", "Paper"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn symbols_are_unique() {
        let symbols: BTreeSet<&str> = IDX_UNIVERSE.iter().map(|l| l.symbol).collect();
        assert_eq!(symbols.len(), IDX_UNIVERSE.len());
    }
}
