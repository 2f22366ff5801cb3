//! Localized button captions and error-report labels
//!
//! The dialog never reaches for a process-wide table directly: callers hand a
//! [`LabelSource`] to the dispatcher, which resolves one [`Labels`] per invocation.

/// Pre-resolved strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub yes: String,
    pub no: String,
    pub ok: String,
    pub cancel: String,
    pub exception: String,
    pub error_occurred: String,
    pub location: String,
    pub message: String,
}

/// Lookup capability keyed by locale tag.
pub trait LabelSource: Send + Sync {
    fn resolve(&self, locale: &str) -> Labels;
}

/// The built-in translation table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLabels;

type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

impl BuiltinLabels {
    /// Tags known to the table, in table order
    pub fn tags() -> impl Iterator<Item = &'static str> {
        TABLE.iter().map(|row| row.0)
    }

    fn lookup(locale: &str) -> &'static Row {
        let wanted = normalize_tag(locale).to_ascii_lowercase();

        // Longest matching prefix wins so "en-GB" beats "en"
        TABLE
            .iter()
            .filter(|row| tag_matches(&wanted, &row.0.to_ascii_lowercase()))
            .max_by_key(|row| row.0.len())
            .unwrap_or(&TABLE[0])
    }
}

impl LabelSource for BuiltinLabels {
    fn resolve(&self, locale: &str) -> Labels {
        let row = Self::lookup(locale);
        Labels {
            yes: row.1.to_string(),
            no: row.2.to_string(),
            ok: row.3.to_string(),
            cancel: row.4.to_string(),
            exception: row.5.to_string(),
            error_occurred: row.6.to_string(),
            location: row.7.to_string(),
            message: row.8.to_string(),
        }
    }
}

/// `wanted` starts with `tag` on a subtag boundary
fn tag_matches(wanted: &str, tag: &str) -> bool {
    match wanted.strip_prefix(tag) {
        Some(rest) => rest.is_empty() || rest.starts_with('-'),
        None => false,
    }
}

/// Turn a POSIX locale ("pt_BR.UTF-8@euro") into a tag ("pt-BR")
pub fn normalize_tag(raw: &str) -> String {
    let base = raw.split(['.', '@']).next().unwrap_or_default();
    base.trim().replace('_', "-")
}

/// Active locale: explicit override, then the usual POSIX variables, then "en"
pub fn detect_locale(configured: Option<&str>) -> String {
    if let Some(tag) = configured.filter(|t| !t.trim().is_empty()) {
        return normalize_tag(tag);
    }

    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| normalize_tag(&value))
        .find(|tag| !tag.is_empty() && tag != "C" && tag != "POSIX")
        .unwrap_or_else(|| "en".to_string())
}

// (tag, yes, no, ok, cancel, exception, error occurred, location, message)
const TABLE: &[Row] = &[
    ("en", "Yes", "No", "Ok", "Cancel", "Exception", "An error occurred", "Location", "Message"),
    ("pt", "Sim", "Não", "Ok", "Cancelar", "Exceção", "Ocorreu um erro", "Localização", "Mensagem"),
    ("es", "Sí", "No", "Aceptar", "Cancelar", "Excepción", "Ocurrió un error", "Ubicación", "Mensaje"),
    ("fr", "Oui", "Non", "Ok", "Annuler", "Exception", "Une erreur est survenue", "Emplacement", "Message"),
    ("de", "Ja", "Nein", "Ok", "Abbrechen", "Ausnahme", "Ein Fehler ist aufgetreten", "Speicherort", "Nachricht"),
    ("it", "Sì", "No", "Ok", "Annulla", "Eccezione", "Si è verificato un errore", "Posizione", "Messaggio"),
    ("ja", "はい", "いいえ", "OK", "キャンセル", "例外", "エラーが発生しました", "場所", "メッセージ"),
    ("zh-CN", "是", "否", "确定", "取消", "异常", "发生了一个错误", "位置", "消息"),
    ("ko", "예", "아니오", "확인", "취소", "예외", "오류가 발생했습니다", "위치", "메시지"),
    ("ar", "نعم", "لا", "موافق", "إلغاء", "استثناء", "حدث خطأ", "الموقع", "الرسالة"),
    ("en-US", "Yes", "No", "OK", "Cancel", "Exception", "An error occurred", "Location", "Message"),
    ("en-GB", "Yes", "No", "OK", "Cancel", "Exception", "An error occurred", "Location", "Message"),
    ("es-ES", "Sí", "No", "Aceptar", "Cancelar", "Excepción", "Ha ocurrido un error", "Ubicación", "Mensaje"),
    ("fr-FR", "Oui", "Non", "OK", "Annuler", "Exception", "Une erreur s'est produite", "Emplacement", "Message"),
    ("de-DE", "Ja", "Nein", "OK", "Abbrechen", "Ausnahme", "Es ist ein Fehler aufgetreten", "Speicherort", "Nachricht"),
    ("it-IT", "Sì", "No", "OK", "Annulla", "Eccezione", "Si è verificato un errore", "Posizione", "Messaggio"),
    ("ja-JP", "はい", "いいえ", "OK", "キャンセル", "例外", "エラーが発生しました", "場所", "メッセージ"),
    ("zh-Hans", "是", "否", "确定", "取消", "异常", "发生了一个错误", "位置", "消息"),
    ("ru-RU", "Да", "Нет", "ОК", "Отмена", "Исключение", "Произошла ошибка", "Местоположение", "Сообщение"),
    ("ko-KR", "예", "아니오", "확인", "취소", "예외", "오류가 발생했습니다", "위치", "메시지"),
    ("ar-SA", "نعم", "لا", "موافق", "إلغاء", "استثناء", "حدث خطأ", "الموقع", "الرسالة"),
    ("nl", "Ja", "Nee", "Ok", "Annuleren", "Uitzondering", "Er is een fout opgetreden", "Locatie", "Bericht"),
    ("sv", "Ja", "Nej", "Ok", "Avbryt", "Undantag", "Ett fel har inträffat", "Plats", "Meddelande"),
    ("no", "Ja", "Nei", "Ok", "Avbryt", "Unntak", "Det har oppstått en feil", "Plassering", "Melding"),
    ("da", "Ja", "Nej", "Ok", "Annuller", "Undtagelse", "Der er opstået en fejl", "Placering", "Besked"),
    ("fi", "Kyllä", "Ei", "Ok", "Peruuta", "Poikkeus", "Tapahtui virhe", "Sijainti", "Viesti"),
    ("pl", "Tak", "Nie", "Ok", "Anuluj", "Wyjątek", "Wystąpił błąd", "Lokalizacja", "Wiadomość"),
    ("cs", "Ano", "Ne", "Ok", "Zrušit", "Výjimka", "Došlo k chybě", "Umístění", "Zpráva"),
    ("hu", "Igen", "Nem", "Ok", "Mégse", "Kivétel", "Hiba történt", "Hely", "Üzenet"),
    ("tr", "Evet", "Hayır", "Tamam", "İptal", "İstisna", "Bir hata oluştu", "Konum", "Mesaj"),
    ("el", "Ναι", "Όχι", "Εντάξει", "Άκυρο", "Εξαίρεση", "Παρουσιάστηκε σφάλμα", "Τοποθεσία", "Μήνυμα"),
    ("he", "כן", "לא", "אישור", "ביטול", "חריגה", "אירעה שגיאה", "מיקום", "הודעה"),
    ("id", "Ya", "Tidak", "Oke", "Batal", "Pengecualian", "Terjadi kesalahan", "Lokasi", "Pesan"),
    ("vi", "Có", "Không", "OK", "Hủy bỏ", "Ngoại lệ", "Đã xảy ra lỗi", "Vị trí", "Tin nhắn"),
    ("th", "ใช่", "ไม่ใช่", "ตกลง", "ยกเลิก", "ข้อยกเว้น", "เกิดข้อผิดพลาด", "ตำแหน่ง", "ข้อความ"),
    ("uk", "Так", "Ні", "OK", "Скасувати", "Виняток", "Сталася помилка", "Розташування", "Повідомлення"),
    ("ro", "Da", "Nu", "OK", "Anulează", "Excepție", "A apărut o eroare", "Locație", "Mesaj"),
    ("sk", "Áno", "Nie", "OK", "Zrušiť", "Výnimka", "Vyskytla sa chyba", "Umiestnenie", "Správa"),
    ("sl", "Da", "Ne", "V redu", "Prekliči", "Izjema", "Prišlo je do napake", "Lokacija", "Sporočilo"),
    ("bg", "Да", "Не", "ОК", "Отказ", "Изключение", "Възникна грешка", "Местоположение", "Съобщение"),
    ("hr", "Da", "Ne", "U redu", "Odustani", "Iznimka", "Došlo je do pogreške", "Lokacija", "Poruka"),
    ("sr", "Да", "Не", "У реду", "Откажи", "Изузетак", "Дошло је до грешке", "Локација", "Порука"),
    ("lt", "Taip", "Ne", "Gerai", "Atšaukti", "Išimtis", "Įvyko klaida", "Vieta", "Pranešimas"),
    ("lv", "Jā", "Nē", "Labi", "Atcelt", "Izņēmums", "Ir notikusi kļūda", "Atrašanās vieta", "Ziņojums"),
    ("et", "Jah", "Ei", "OK", "Tühista", "Erand", "Tekkis viga", "Asukoht", "Sõnum"),
    ("mk", "Да", "Не", "Во ред", "Откажи", "Исклучок", "Настана грешка", "Локација", "Порака"),
    ("sq", "Po", "Jo", "OK", "Anulo", "Përjashtim", "Ndodhi një gabim", "Vendndodhja", "Mesazh"),
    ("az", "Bəli", "Xeyr", "OK", "Ləğv et", "İstisna", "Xəta baş verdi", "Yer", "Mesaj"),
    ("bn", "হ্যাঁ", "না", "ঠিক আছে", "বাতিল করুন", "ব্যতিক্রম", "একটি ত্রুটি ঘটেছে", "অবস্থান", "বার্তা"),
    ("fa", "بله", "نه", "تایید", "لغو", "استثنا", "خطایی رخ داده است", "مکان", "پیام"),
    ("hi", "हाँ", "नहीं", "ठीक है", "रद्द करें", "अपवाद", "एक त्रुटि हुई", "स्थान", "संदेश"),
    ("ka", "დიახ", "არა", "კარგი", "გაუქმება", "გამონაკლისი", "მოხდა შეცდომა", "ადგილმდებარეობა", "შეტყობინება"),
    ("kk", "Иә", "Жоқ", "Жарайды", "Бас тарту", "Айырып алу", "Қате орын алды", "Орналасқан жері", "Хабарлама"),
    ("km", "បាទ/ចាស", "ទេ", "យល់ព្រម", "បោះបង់", "ករណីលើកលែង", "មានកំហុសបានកើតឡើង", "ទីតាំង", "សារ"),
    ("ky", "Ооба", "Жок", "Макул", "Баш тарт", "Айрыкча учур", "Ката кетти", "Жайгашкан жери", "Кабар"),
    ("lo", "ແມ່ນ", "ບໍ່", "ຕົກລົງ", "ຍົກເລີກ", "ຂໍ້ຍົກເວັ້ນ", "ເກີດຂໍ້ຜິດພາດ", "ສະຖານທີ່", "ຂໍ້ຄວາມ"),
    ("mn", "Тийм", "Үгүй", "OK", "Цуцлах", "Онцгой тохиолдол", "Алдаа гарлаа", "Байршил", "Зурвас"),
    ("my", "ဟုတ်ကဲ့", "မဟုတ်ပါ", "အိုကေ", "ပယ်ဖျက်", "ချွင်းချက်", "အမှားတစ်ခုဖြစ်ပွားခဲ့သည်", "တည်နေရာ", "သတင်းစကား"),
    ("ne", "हुन्छ", "हुँदैन", "ठीक छ", "रद्द गर्नुहोस्", "अपवाद", "त्रुटि भयो", "स्थान", "सन्देश"),
    ("pa", "ਹਾਂ", "ਨਹੀਂ", "ਠੀਕ ਹੈ", "ਰੱਦ ਕਰੋ", "ਅਪਵਾਦ", "ਇੱਕ ਗਲਤੀ ਆਈ ਹੈ", "ਸਥਾਨ", "ਸੁਨੇਹਾ"),
    ("si", "ඔව්", "නැත", "හරි", "අවලංගු කරන්න", "ව්යතිරේකය", "දෝෂයක් සිදුවී ඇත", "ස්ථානය", "පණිවිඩය"),
    ("sw", "Ndiyo", "Hapana", "Sawa", "Ghairi", "Tofauti", "Hitilafu imetokea", "Mahali", "Ujumbe"),
    ("ta", "ஆம்", "இல்லை", "சரி", "ரத்து செய்", "விலக்கு", "ஒரு பிழை ஏற்பட்டது", "இடம்", "செய்தி"),
    ("te", "అవును", "కాదు", "సరే", "రద్దు చేయి", "మినహాయింపు", "ఒక లోపం సంభవించింది", "స్థానం", "సందేశం"),
    ("ur", "جی ہاں", "نہیں", "ٹھیک ہے", "منسوخ کریں", "مستثنیٰ", "ایک خرابی پیش آئی", "مقام", "پیغام"),
    ("uz", "Ha", "Yo'q", "OK", "Bekor qilish", "Istisno", "Xatolik yuz berdi", "Manzil", "Xabar"),
    ("zh-TW", "是", "否", "確定", "取消", "例外", "發生了一個錯誤", "位置", "訊息"),
];
