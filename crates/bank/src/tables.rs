//! Curated, hand-maintained data tables.
//!
//! These encode editorial judgement (how recognizable a city is, which
//! territories are too obscure to quiz on) rather than anything derivable
//! from the datasets, so they live in code and change by review.

use foundation::math::GeoPoint;
use foundation::normalize_geo_name;

/// Recognizability score per city, keyed by normalized English name.
/// 1.0 is "everyone has heard of it".
pub const CITY_FAME_SCORES: [(&str, f64); 76] = [
    ("newyork", 1.0),
    ("london", 1.0),
    ("paris", 0.99),
    ("tokyo", 0.99),
    ("beijing", 0.98),
    ("shanghai", 0.98),
    ("hongkong", 0.98),
    ("singapore", 0.98),
    ("dubai", 0.97),
    ("losangeles", 0.97),
    ("sanfrancisco", 0.96),
    ("chicago", 0.95),
    ("toronto", 0.94),
    ("vancouver", 0.92),
    ("montreal", 0.91),
    ("mexicocity", 0.95),
    ("saopaulo", 0.95),
    ("riodejaneiro", 0.93),
    ("buenosaires", 0.93),
    ("delhi", 0.95),
    ("mumbai", 0.95),
    ("bangkok", 0.94),
    ("seoul", 0.96),
    ("madrid", 0.94),
    ("barcelona", 0.94),
    ("berlin", 0.94),
    ("rome", 0.93),
    ("milan", 0.91),
    ("amsterdam", 0.92),
    ("brussels", 0.89),
    ("vienna", 0.9),
    ("prague", 0.88),
    ("warsaw", 0.87),
    ("budapest", 0.86),
    ("athens", 0.86),
    ("zurich", 0.89),
    ("geneva", 0.88),
    ("stockholm", 0.88),
    ("oslo", 0.86),
    ("copenhagen", 0.87),
    ("helsinki", 0.84),
    ("dublin", 0.85),
    ("lisbon", 0.86),
    ("moscow", 0.94),
    ("istanbul", 0.94),
    ("cairo", 0.93),
    ("johannesburg", 0.91),
    ("lagos", 0.9),
    ("nairobi", 0.87),
    ("casablanca", 0.85),
    ("addisababa", 0.83),
    ("sydney", 0.94),
    ("melbourne", 0.91),
    ("auckland", 0.86),
    ("wellington", 0.8),
    ("tehran", 0.89),
    ("riyadh", 0.89),
    ("jeddah", 0.82),
    ("doha", 0.83),
    ("abudhabi", 0.88),
    ("karachi", 0.88),
    ("jakarta", 0.92),
    ("manila", 0.89),
    ("hochiminhcity", 0.86),
    ("hanoi", 0.84),
    ("osaka", 0.9),
    ("kyoto", 0.8),
    ("wuhan", 0.84),
    ("guangzhou", 0.9),
    ("shenzhen", 0.9),
    ("chongqing", 0.84),
    ("tianjin", 0.82),
    ("chengdu", 0.85),
    ("xian", 0.82),
    ("hangzhou", 0.84),
    ("nanjing", 0.82),
];

/// Fame lookup on an already-normalized key.
pub fn fame_score(normalized: &str) -> Option<f64> {
    if normalized.is_empty() {
        return None;
    }
    CITY_FAME_SCORES
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, score)| *score)
}

/// Fame lookup on a raw city name.
pub fn fame_score_for(name: &str) -> Option<f64> {
    fame_score(&normalize_geo_name(name))
}

/// Territories (normalized country names) excluded from the world-city
/// pool outright: mostly tiny dependencies whose capitals nobody should
/// be quizzed on.
pub const WORLD_CITY_COUNTRY_BLOCKLIST: [&str; 39] = [
    "bouvetisland",
    "frenchsouthernandantarcticlands",
    "unitedstatesminoroutlyingislands",
    "caribbeannetherlands",
    "britishindianoceanterritory",
    "cocoskeelingislands",
    "christmasisland",
    "pitcairnislands",
    "tokelau",
    "wallisandfutuna",
    "southgeorgia",
    "svalbardandjanmayen",
    "saintpierreandmiquelon",
    "frenchpolynesia",
    "guadeloupe",
    "martinique",
    "reunion",
    "mayotte",
    "guam",
    "northernmarianaislands",
    "americansamoa",
    "cookislands",
    "niue",
    "turksandcaicosislands",
    "caymanislands",
    "montserrat",
    "anguilla",
    "aruba",
    "curacao",
    "sintmaarten",
    "faroeislands",
    "gibraltar",
    "isleofman",
    "jersey",
    "guernsey",
    "alandislands",
    "britishvirginislands",
    "unitedstatesvirginislands",
    "falklandislands",
];

pub fn is_blocked_country(normalized: &str) -> bool {
    WORLD_CITY_COUNTRY_BLOCKLIST.contains(&normalized)
}

/// World-city composite score weights: country economy dominates, fame
/// close behind, city type as a tiebreaker.
pub const WEIGHT_COUNTRY_GDP: f64 = 0.5;
pub const WEIGHT_CITY_FAME: f64 = 0.42;
pub const WEIGHT_CITY_TYPE: f64 = 0.08;

/// Minimum picks per region for the world-city pool, (region, top50, top200).
pub const WORLD_CITY_REGION_MINIMUMS: [(&str, usize, usize); 5] = [
    ("Africa", 3, 12),
    ("Americas", 8, 22),
    ("Asia", 11, 34),
    ("Europe", 11, 34),
    ("Oceania", 2, 5),
];

/// Chinese provinces excluded from the capital-location challenge:
/// municipalities and special administrative regions where the "capital"
/// is the province itself.
pub const CITY_CHALLENGE_EXCLUDED_PROVINCES: [&str; 7] = [
    "北京市",
    "天津市",
    "上海市",
    "重庆市",
    "香港特别行政区",
    "澳门特别行政区",
    "台湾省",
];

pub fn is_excluded_china_province(province: &str) -> bool {
    CITY_CHALLENGE_EXCLUDED_PROVINCES.contains(&province)
}

/// Province capital names, keyed by province. Municipalities and SARs are
/// absent on purpose.
pub const CHINA_PROVINCE_CAPITALS: [(&str, &str); 27] = [
    ("河北省", "石家庄市"),
    ("山西省", "太原市"),
    ("内蒙古自治区", "呼和浩特市"),
    ("辽宁省", "沈阳市"),
    ("吉林省", "长春市"),
    ("黑龙江省", "哈尔滨市"),
    ("江苏省", "南京市"),
    ("浙江省", "杭州市"),
    ("安徽省", "合肥市"),
    ("福建省", "福州市"),
    ("江西省", "南昌市"),
    ("山东省", "济南市"),
    ("河南省", "郑州市"),
    ("湖北省", "武汉市"),
    ("湖南省", "长沙市"),
    ("广东省", "广州市"),
    ("广西壮族自治区", "南宁市"),
    ("海南省", "海口市"),
    ("四川省", "成都市"),
    ("贵州省", "贵阳市"),
    ("云南省", "昆明市"),
    ("西藏自治区", "拉萨市"),
    ("陕西省", "西安市"),
    ("甘肃省", "兰州市"),
    ("青海省", "西宁市"),
    ("宁夏回族自治区", "银川市"),
    ("新疆维吾尔自治区", "乌鲁木齐市"),
];

pub fn province_capital(province: &str) -> Option<&'static str> {
    CHINA_PROVINCE_CAPITALS
        .iter()
        .find(|(p, _)| *p == province)
        .map(|(_, capital)| *capital)
}

/// A curated second-largest city per province.
#[derive(Debug, Clone, Copy)]
pub struct SecondaryCity {
    pub province: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl SecondaryCity {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

pub const CHINA_SECONDARY_CITIES: [SecondaryCity; 27] = [
    SecondaryCity { province: "河北省", name: "唐山市", lat: 39.6305, lon: 118.1806 },
    SecondaryCity { province: "山西省", name: "大同市", lat: 40.0768, lon: 113.3001 },
    SecondaryCity { province: "内蒙古自治区", name: "包头市", lat: 40.6574, lon: 109.8404 },
    SecondaryCity { province: "辽宁省", name: "大连市", lat: 38.914, lon: 121.6147 },
    SecondaryCity { province: "吉林省", name: "吉林市", lat: 43.8378, lon: 126.5496 },
    SecondaryCity { province: "黑龙江省", name: "齐齐哈尔市", lat: 47.3543, lon: 123.9182 },
    SecondaryCity { province: "江苏省", name: "苏州市", lat: 31.2989, lon: 120.5853 },
    SecondaryCity { province: "浙江省", name: "宁波市", lat: 29.8683, lon: 121.544 },
    SecondaryCity { province: "安徽省", name: "芜湖市", lat: 31.3525, lon: 118.4331 },
    SecondaryCity { province: "福建省", name: "厦门市", lat: 24.4798, lon: 118.0894 },
    SecondaryCity { province: "江西省", name: "赣州市", lat: 25.8311, lon: 114.9359 },
    SecondaryCity { province: "山东省", name: "青岛市", lat: 36.0671, lon: 120.3826 },
    SecondaryCity { province: "河南省", name: "洛阳市", lat: 34.6197, lon: 112.454 },
    SecondaryCity { province: "湖北省", name: "宜昌市", lat: 30.6919, lon: 111.2865 },
    SecondaryCity { province: "湖南省", name: "衡阳市", lat: 26.9004, lon: 112.5719 },
    SecondaryCity { province: "广东省", name: "深圳市", lat: 22.5431, lon: 114.0579 },
    SecondaryCity { province: "广西壮族自治区", name: "桂林市", lat: 25.2741, lon: 110.2991 },
    SecondaryCity { province: "海南省", name: "三亚市", lat: 18.2528, lon: 109.5119 },
    SecondaryCity { province: "四川省", name: "绵阳市", lat: 31.4675, lon: 104.6796 },
    SecondaryCity { province: "贵州省", name: "遵义市", lat: 27.7257, lon: 106.9272 },
    SecondaryCity { province: "云南省", name: "曲靖市", lat: 25.4902, lon: 103.7963 },
    SecondaryCity { province: "西藏自治区", name: "日喀则市", lat: 29.2673, lon: 88.8812 },
    SecondaryCity { province: "陕西省", name: "榆林市", lat: 38.2858, lon: 109.7341 },
    SecondaryCity { province: "甘肃省", name: "天水市", lat: 34.5809, lon: 105.7249 },
    SecondaryCity { province: "青海省", name: "海东市", lat: 36.4821, lon: 102.4102 },
    SecondaryCity { province: "宁夏回族自治区", name: "吴忠市", lat: 37.9975, lon: 106.1986 },
    SecondaryCity { province: "新疆维吾尔自治区", name: "喀什市", lat: 39.4677, lon: 75.9898 },
];
