use movies_types::Lang;

/// (title, message) for error codes
type Messages = phf::Map<&'static str, (&'static str, &'static str)>;

static EN: Messages = phf::phf_map! {
    "err_bad_request" => ("Bad Request", "The request is invalid, please check your input"),
    "err_movie_id_not_found" => ("Movie Not Found", "Movie with the given id does not exist"),
    "err_internal_server" => ("Internal Server Error", "Something went wrong, please try again later"),
};

static ID: Messages = phf::phf_map! {
    "err_bad_request" => ("Permintaan Tidak Valid", "Permintaan tidak valid, silakan periksa kembali input Anda"),
    "err_movie_id_not_found" => ("Film Tidak Ditemukan", "Film dengan id tersebut tidak ditemukan"),
    "err_internal_server" => ("Kesalahan Server", "Terjadi kesalahan, silakan coba beberapa saat lagi"),
};

fn table(lang: Lang) -> &'static Messages {
    match lang {
        Lang::En => &EN,
        Lang::Id => &ID,
    }
}

fn lookup(lang: Lang, code: &str) -> Option<&'static (&'static str, &'static str)> {
    table(lang).get(code).or_else(|| EN.get(code))
}

/// Localized title, code itself if unknown
pub fn title(lang: Lang, code: &str) -> String {
    lookup(lang, code)
        .map(|(title, _)| title.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Localized message, code itself if unknown
pub fn message(lang: Lang, code: &str) -> String {
    lookup(lang, code)
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codes_translated() {
        for code in EN.keys() {
            assert!(ID.contains_key(code), "missing id translation for {code}");
        }
        assert_eq!(EN.len(), ID.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(title(Lang::En, "err_movie_id_not_found"), "Movie Not Found");
        assert_eq!(title(Lang::Id, "err_movie_id_not_found"), "Film Tidak Ditemukan");
        assert_eq!(message(Lang::Id, "err_unknown"), "err_unknown");
    }
}
