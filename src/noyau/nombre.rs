// src/noyau/nombre.rs
//
// Grammaire des littéraux numériques.
//
//   [-] chiffres* [ . chiffres* ] [ (e|E) [+|-] chiffres+ ]
//
// Règles:
// - au moins un chiffre dans la mantisse (".7" et "5." OK, "." refusé)
// - pas de '+' en tête : "+" reste toujours un opérateur
// - l’exposant est borné (garde-fou : l’expansion décimale doit rester petite)
//
// Exemples valides : 5, -3, .7, -.80, -2.98, 1.678e+32, 70e-54
// Exemples refusés : e20, -, ., +5, 1e, 1.2.3, abc

/// Garde-fou : |exposant| max (au-delà, l’expansion décimale devient absurde).
pub const EXPOSANT_MAX: i64 = 100_000;

/// Littéral numérique validé par la grammaire.
///
/// On garde le texte d’origine : un littéral sans exposant est utilisé tel quel
/// (aucune perte de précision sur les très grands / très précis).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nombre {
    texte: String,
    negatif: bool,
    entier: String,
    fraction: String,
    exposant: Option<i64>,
}

impl Nombre {
    /// Texte tel que saisi.
    pub fn texte(&self) -> &str {
        &self.texte
    }

    /// Vrai si tous les chiffres de la mantisse sont des zéros ("0", "-0.0", "0e10"...).
    pub fn est_zero(&self) -> bool {
        self.entier
            .bytes()
            .chain(self.fraction.bytes())
            .all(|c| c == b'0')
    }

    /// Nombre de chiffres après la virgule dans la forme décimale “plate”.
    pub fn chiffres_fractionnaires(&self) -> usize {
        match self.exposant {
            None => self.fraction.len(),
            Some(e) => (self.fraction.len() as i64 - e).max(0) as usize,
        }
    }

    pub fn a_une_fraction(&self) -> bool {
        self.chiffres_fractionnaires() > 0
    }

    /// Forme décimale sans exposant.
    ///
    /// - sans exposant : texte d’origine (inchangé)
    /// - avec exposant : expansion “à plat” (1.678e+32 -> 1678 suivi de 29 zéros)
    pub fn forme_decimale(&self) -> String {
        let Some(e) = self.exposant else {
            return self.texte.clone();
        };

        let chiffres = format!("{}{}", self.entier, self.fraction);
        // position de la virgule dans `chiffres`
        let point = self.entier.len() as i64 + e;

        let corps = if point <= 0 {
            format!("0.{}{chiffres}", "0".repeat((-point) as usize))
        } else if point as usize >= chiffres.len() {
            format!("{chiffres}{}", "0".repeat(point as usize - chiffres.len()))
        } else {
            let (a, b) = chiffres.split_at(point as usize);
            format!("{a}.{b}")
        };

        let corps = sans_zeros_de_tete(&corps);
        if self.negatif {
            format!("-{corps}")
        } else {
            corps
        }
    }
}

/// "007.5" -> "7.5", "000" -> "0", "0.5" inchangé.
fn sans_zeros_de_tete(s: &str) -> String {
    let t = s.trim_start_matches('0');
    if t.is_empty() || t.starts_with('.') {
        format!("0{t}")
    } else {
        t.to_string()
    }
}

/// Analyse un jeton selon la grammaire numérique.
/// Renvoie None si le jeton n’est pas un nombre.
pub fn parse_nombre(s: &str) -> Option<Nombre> {
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    let negatif = chars.first() == Some(&'-');
    if negatif {
        i += 1;
    }

    // partie entière
    let start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    let entier: String = chars[start..i].iter().collect();

    // partie fractionnaire
    let mut fraction = String::new();
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        let start_f = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        fraction = chars[start_f..i].iter().collect();
    }

    if entier.is_empty() && fraction.is_empty() {
        return None;
    }

    // exposant
    let mut exposant = None;
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        i += 1;
        let mut neg_e = false;
        if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
            neg_e = chars[i] == '-';
            i += 1;
        }
        let start_e = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if start_e == i {
            return None;
        }
        let e_str: String = chars[start_e..i].iter().collect();
        let e: i64 = e_str.parse().ok()?;
        if e > EXPOSANT_MAX {
            return None;
        }
        exposant = Some(if neg_e { -e } else { e });
    }

    // reste non consommé => pas un nombre
    if i != chars.len() {
        return None;
    }

    Some(Nombre {
        texte: s.to_string(),
        negatif,
        entier,
        fraction,
        exposant,
    })
}

pub fn est_numerique(s: &str) -> bool {
    parse_nombre(s).is_some()
}
