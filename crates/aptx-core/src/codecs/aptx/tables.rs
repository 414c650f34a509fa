//! aptX constant tables
//!
//! QMF prototype coefficients, the logDelta-to-delta mantissa table and the
//! per-band quantiser tables for both codec variants. Every entry is part of
//! the bitstream contract: a single changed value breaks decoder
//! interoperability.

use crate::types::{Subband, Variant};

/// Outer QMF stage coefficients, one row per polyphase branch
pub const QMF_OUTER_COEFFS: [[i32; 16]; 2] = [
    [
        730, -413, -9611, 43626, -121026, 269973, -585547, 2801966,
        697128, -160481, 27611, 8478, -10043, 3511, 688, -897,
    ],
    [
        -897, 688, 3511, -10043, 8478, 27611, -160481, 697128,
        2801966, -585547, 269973, -121026, 43626, -9611, -413, 730,
    ],
];

/// Inner QMF stage coefficients, one row per polyphase branch
pub const QMF_INNER_COEFFS: [[i32; 16]; 2] = [
    [
        1033, -584, -13592, 61697, -171156, 381799, -828088, 3962579,
        985888, -226954, 39048, 11990, -14203, 4966, 973, -1268,
    ],
    [
        -1268, 973, 4966, -14203, 11990, 39048, -226954, 985888,
        3962579, -828088, 381799, -171156, 61697, -13592, -584, 1033,
    ],
];

/// Delta mantissas indexed by bits 3..8 of logDelta
pub const DELTA_MANTISSAS: [i32; 32] = [
    2048, 2093, 2139, 2186, 2233, 2282, 2332, 2383,
    2435, 2489, 2543, 2599, 2656, 2714, 2774, 2834,
    2896, 2960, 3025, 3091, 3158, 3228, 3298, 3371,
    3444, 3520, 3597, 3676, 3756, 3838, 3922, 4008,
];

/// logDelta leak coefficient (Q15)
pub const LOG_DELTA_LEAK: i32 = 0x7F6C;

/// Dither PRNG multiplier
pub const DITHER_MULTIPLIER: i64 = 0x4F1BBB;

/// Upper logDelta bound per band (LL, LH, HL, HH)
pub const MAX_LOG_DELTA: [i32; 4] = [0x11FF, 0x14FF, 0x16FF, 0x15FF];

/// Zero-filter tap count per band (LL, LH, HL, HH)
pub const NUM_ZEROS: [usize; 4] = [24, 12, 6, 12];

/// Everything one sub-band needs from the constant tables
#[derive(Debug, Clone, Copy)]
pub struct BandTables {
    /// Decision thresholds, monotonic, entry 0 negative
    pub thresholds: &'static [i32],
    /// Dither scale applied during reconstruction
    pub inverse_dither: &'static [i32],
    /// Dither scale applied during quantisation
    pub dither: &'static [i32],
    /// logDelta increment per code magnitude
    pub log_delta_increments: &'static [i32],
    /// Upper logDelta bound
    pub max_log_delta: i32,
    /// Zero-filter tap count
    pub num_zeros: usize,
    /// Saturate the dithered reconstruction level to 24 bits
    pub saturate_dequantised: bool,
}

impl BandTables {
    const fn new(
        thresholds: &'static [i32],
        inverse_dither: &'static [i32],
        dither: &'static [i32],
        log_delta_increments: &'static [i32],
        band: Subband,
    ) -> Self {
        Self {
            thresholds,
            inverse_dither,
            dither,
            log_delta_increments,
            max_log_delta: MAX_LOG_DELTA[band as usize],
            num_zeros: NUM_ZEROS[band as usize],
            // HL reconstruction levels never leave 24 bits; its path skips the clip
            saturate_dequantised: !matches!(band, Subband::HL),
        }
    }

    /// Number of binary-search comparisons made by the quantiser
    pub fn search_steps(&self) -> u32 {
        (self.thresholds.len() >> 1).trailing_zeros() + 1
    }
}

/// aptX band tables in LL, LH, HL, HH order
pub static APTX_BANDS: [BandTables; 4] = [
    BandTables::new(&THRESHOLDS_LL, &INVERSE_DITHER_LL, &DITHER_LL, &LOG_DELTA_INCREMENTS_LL, Subband::LL),
    BandTables::new(&THRESHOLDS_LH, &INVERSE_DITHER_LH, &DITHER_LH, &LOG_DELTA_INCREMENTS_LH, Subband::LH),
    BandTables::new(&THRESHOLDS_HL, &INVERSE_DITHER_HL, &DITHER_HL, &LOG_DELTA_INCREMENTS_HL, Subband::HL),
    BandTables::new(&THRESHOLDS_HH, &INVERSE_DITHER_HH, &DITHER_HH, &LOG_DELTA_INCREMENTS_HH, Subband::HH),
];

/// aptX-HD band tables in LL, LH, HL, HH order
pub static APTX_HD_BANDS: [BandTables; 4] = [
    BandTables::new(&HD_THRESHOLDS_LL, &HD_INVERSE_DITHER_LL, &HD_DITHER_LL, &HD_LOG_DELTA_INCREMENTS_LL, Subband::LL),
    BandTables::new(&HD_THRESHOLDS_LH, &HD_INVERSE_DITHER_LH, &HD_DITHER_LH, &HD_LOG_DELTA_INCREMENTS_LH, Subband::LH),
    BandTables::new(&HD_THRESHOLDS_HL, &HD_INVERSE_DITHER_HL, &HD_DITHER_HL, &HD_LOG_DELTA_INCREMENTS_HL, Subband::HL),
    BandTables::new(&HD_THRESHOLDS_HH, &HD_INVERSE_DITHER_HH, &HD_DITHER_HH, &HD_LOG_DELTA_INCREMENTS_HH, Subband::HH),
];

/// Tables for every band of a variant
pub fn variant_tables(variant: Variant) -> &'static [BandTables; 4] {
    match variant {
        Variant::Aptx => &APTX_BANDS,
        Variant::AptxHd => &APTX_HD_BANDS,
    }
}

/// Tables for one band of a variant
pub fn band_tables(variant: Variant, band: Subband) -> &'static BandTables {
    &variant_tables(variant)[band.index()]
}

/// aptX LL quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const THRESHOLDS_LL: [i32; 65] = [
      -9948,    9948,   29860,   49808,   69822,   89926,  110144,  130502,
     151026,  171738,  192666,  213832,  235264,  256982,  279014,  301384,
     324118,  347244,  370790,  394782,  419250,  444226,  469742,  495832,
     522536,  549890,  577936,  606720,  636290,  666700,  698006,  730270,
     763560,  797952,  833528,  870376,  908600,  948312,  989636, 1032712,
    1077696, 1124772, 1174148, 1226064, 1280808, 1338710, 1400168, 1465660,
    1535778, 1611262, 1693036, 1782282, 1880536, 1989882, 2113330, 2254848,
    2419912, 2616846, 2857688, 3162376, 3565508, 4126044, 4963512, 6403188,
    8388607,
];

/// aptX LL dither scale used when reconstructing
pub const INVERSE_DITHER_LL: [i32; 65] = [
     9948,  9948,  9962,  9988, 10026, 10077, 10138, 10212,
    10297, 10394, 10502, 10623, 10756, 10901, 11060, 11232,
    11418, 11620, 11836, 12068, 12318, 12586, 12874, 13182,
    13511, 13863, 14239, 14640, 15068, 15524, 16012, 16533,
    17087, 17680, 18311, 18985, 19703, 20469, 21284, 22153,
    23079, 24067, 25119, 26239, 27432, 28703, 30059, 31507,
    33054, 34704, 36465, 38345, 40353, 42497, 44788, 47236,
    49851, 52645, 55631, 58822, 62233, 65876, 69770, 73932,
    78380,
];

/// aptX LL dither scale used when quantising
pub const DITHER_LL: [i32; 65] = [
        0,     4,     7,    10,    13,    16,    19,    22,
       26,    28,    32,    35,    38,    41,    44,    47,
       51,    54,    58,    62,    65,    70,    74,    79,
       84,    90,    95,   102,   109,   116,   124,   133,
      143,   154,   166,   180,   195,   212,   231,   254,
      279,   308,   343,   383,   430,   487,   555,   639,
      743,   876,  1045,  1270,  1575,  2002,  2628,  3591,
     5177,  8026, 13719, 26197, 56509,     0,     0,     0,
        0,
];

/// aptX LL logDelta increment per code magnitude
pub const LOG_DELTA_INCREMENTS_LL: [i32; 65] = [
      0, -21, -19, -17, -15, -12, -10,  -8,
     -6,  -4,  -1,   1,   3,   6,   8,  10,
     13,  15,  18,  20,  23,  26,  29,  31,
     34,  37,  40,  43,  47,  50,  53,  57,
     60,  64,  68,  72,  76,  80,  85,  89,
     94,  99, 105, 110, 116, 123, 129, 136,
    144, 152, 161, 171, 182, 194, 207, 223,
    241, 263, 291, 328, 382, 467, 522, 522,
    522,
];

/// aptX LH quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const THRESHOLDS_LH: [i32; 9] = [
     -89806,   89806,  278502,  494338,  759442, 1113930, 1652322, 2720256,
    5190186,
];

/// aptX LH dither scale used when reconstructing
pub const INVERSE_DITHER_LH: [i32; 9] = [
      89806,   89806,   98890,  116946,  148158,  205512,  333698,  734236,
    1735696,
];

/// aptX LH dither scale used when quantising
pub const DITHER_LH: [i32; 9] = [
         0,   2271,   4514,   7803,  14339,  32047, 100135, 250365,
         0,
];

/// aptX LH logDelta increment per code magnitude
pub const LOG_DELTA_INCREMENTS_LH: [i32; 9] = [
      0, -14,   6,  29,  58,  96, 154, 270,
    521,
];

/// aptX HL quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const THRESHOLDS_HL: [i32; 3] = [
    -194080,  194080,  890562,
];

/// aptX HL dither scale used when reconstructing
pub const INVERSE_DITHER_HL: [i32; 3] = [
    194080, 194080, 502402,
];

/// aptX HL dither scale used when quantising
pub const DITHER_HL: [i32; 3] = [
        0, 77081,     0,
];

/// aptX HL logDelta increment per code magnitude
pub const LOG_DELTA_INCREMENTS_HL: [i32; 3] = [
      0, -33, 136,
];

/// aptX HH quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const THRESHOLDS_HH: [i32; 5] = [
    -163006,  163006,  542708, 1120554, 2669238,
];

/// aptX HH dither scale used when reconstructing
pub const INVERSE_DITHER_HH: [i32; 5] = [
     163006,  163006,  216698,  361148, 1187538,
];

/// aptX HH dither scale used when quantising
pub const DITHER_HH: [i32; 5] = [
         0,  13423,  36113, 206598,      0,
];

/// aptX HH logDelta increment per code magnitude
pub const LOG_DELTA_INCREMENTS_HH: [i32; 5] = [
      0,  -8,  33,  95, 262,
];

/// aptX-HD LL quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const HD_THRESHOLDS_LL: [i32; 257] = [
      -2436,    2436,    7308,   12180,   17054,   21930,   26806,   31686,
      36566,   41450,   46338,   51230,   56124,   61024,   65928,   70836,
      75750,   80670,   85598,   90530,   95470,  100418,  105372,  110336,
     115308,  120288,  125278,  130276,  135286,  140304,  145334,  150374,
     155426,  160490,  165566,  170654,  175756,  180870,  185998,  191138,
     196294,  201466,  206650,  211850,  217068,  222300,  227548,  232814,
     238096,  243396,  248714,  254050,  259406,  264778,  270172,  275584,
     281018,  286470,  291944,  297440,  302956,  308496,  314056,  319640,
     325248,  330878,  336532,  342212,  347916,  353644,  359398,  365178,
     370986,  376820,  382680,  388568,  394486,  400430,  406404,  412408,
     418442,  424506,  430600,  436726,  442884,  449074,  455298,  461554,
     467844,  474168,  480528,  486922,  493354,  499820,  506324,  512866,
     519446,  526064,  532722,  539420,  546160,  552940,  559760,  566624,
     573532,  580482,  587478,  594520,  601606,  608740,  615920,  623148,
     630426,  637754,  645132,  652560,  660042,  667576,  675164,  682808,
     690506,  698262,  706074,  713946,  721876,  729868,  737920,  746036,
     754216,  762460,  770770,  779148,  787594,  796108,  804694,  813354,
     822086,  830892,  839774,  848736,  857776,  866896,  876100,  885386,
     894758,  904218,  913766,  923406,  933138,  942964,  952886,  962908,
     973030,  983254,  993582, 1004020, 1014566, 1025224, 1035996, 1046886,
    1057894, 1069026, 1080284, 1091670, 1103186, 1114838, 1126628, 1138558,
    1150634, 1162858, 1175236, 1187768, 1200462, 1213320, 1226346, 1239548,
    1252928, 1266490, 1280242, 1294188, 1308334, 1322688, 1337252, 1352034,
    1367044, 1382284, 1397766, 1413494, 1429478, 1445728, 1462252, 1479058,
    1496158, 1513562, 1531280, 1549326, 1567710, 1586446, 1605550, 1625034,
    1644914, 1665208, 1685932, 1707106, 1728750, 1750886, 1773538, 1796728,
    1820486, 1844838, 1869814, 1895446, 1921770, 1948822, 1976644, 2005280,
    2034778, 2065190, 2096574, 2128992, 2162510, 2197206, 2233164, 2270478,
    2309252, 2349602, 2391662, 2435582, 2481530, 2529702, 2580322, 2633652,
    2690006, 2749758, 2813360, 2881366, 2954468, 3033536, 3119690, 3214388,
    3319576, 3437874, 3572882, 3729678, 3915606, 4141732, 4424850, 4792226,
    5292254, 6021664, 7190426, 8388607, 8388607, 8388607, 8388607, 8388607,
    8388607,
];

/// aptX-HD LL dither scale used when reconstructing
pub const HD_INVERSE_DITHER_LL: [i32; 257] = [
      2436,   2436,   2436,   2436,   2438,   2438,   2438,   2440,
      2442,   2442,   2444,   2446,   2448,   2450,   2454,   2456,
      2458,   2462,   2464,   2468,   2472,   2476,   2480,   2484,
      2488,   2492,   2498,   2502,   2506,   2512,   2516,   2522,
      2528,   2534,   2540,   2546,   2552,   2558,   2564,   2572,
      2578,   2584,   2592,   2600,   2606,   2614,   2622,   2630,
      2638,   2646,   2656,   2664,   2672,   2682,   2690,   2700,
      2710,   2720,   2730,   2740,   2750,   2760,   2772,   2782,
      2794,   2804,   2816,   2828,   2840,   2852,   2864,   2876,
      2888,   2902,   2914,   2928,   2942,   2956,   2970,   2984,
      2998,   3012,   3028,   3042,   3058,   3072,   3088,   3104,
      3120,   3136,   3154,   3170,   3188,   3206,   3224,   3242,
      3260,   3278,   3298,   3316,   3336,   3356,   3376,   3396,
      3418,   3438,   3460,   3482,   3504,   3528,   3550,   3574,
      3598,   3622,   3646,   3672,   3698,   3724,   3750,   3776,
      3804,   3832,   3860,   3890,   3918,   3948,   3980,   4010,
      4042,   4074,   4108,   4140,   4174,   4210,   4244,   4280,
      4318,   4354,   4392,   4432,   4470,   4510,   4552,   4594,
      4636,   4678,   4722,   4768,   4814,   4860,   4908,   4956,
      5006,   5056,   5106,   5158,   5212,   5266,   5320,   5376,
      5434,   5492,   5550,   5610,   5672,   5734,   5798,   5862,
      5928,   5994,   6064,   6132,   6204,   6276,   6350,   6424,
      6502,   6580,   6660,   6742,   6826,   6912,   7000,   7088,
      7180,   7274,   7370,   7468,   7568,   7672,   7778,   7886,
      7996,   8110,   8226,   8346,   8468,   8594,   8722,   8854,
      8990,   9130,   9274,   9422,   9574,   9730,   9892,  10060,
     10232,  10410,  10594,  10784,  10982,  11186,  11398,  11618,
     11846,  12084,  12332,  12590,  12858,  13140,  13434,  13742,
     14066,  14406,  14764,  15142,  15542,  15964,  16412,  16890,
     17398,  17942,  18526,  19154,  19832,  20564,  21360,  22232,
     23188,  24246,  25420,  26734,  28214,  29898,  31830,  34076,
     36720,  39878,  43724,  48524,  54706,  63048,  75264,  95740,
    146946,
];

/// aptX-HD LL dither scale used when quantising
pub const HD_DITHER_LL: [i32; 257] = [
        0,     0,     0,     1,     0,     0,     1,     1,
        0,     1,     1,     1,     1,     1,     1,     1,
        1,     1,     1,     1,     1,     1,     1,     1,
        1,     2,     1,     1,     2,     2,     2,     1,
        2,     2,     2,     2,     2,     2,     2,     2,
        2,     2,     2,     2,     2,     2,     2,     3,
        2,     3,     2,     3,     3,     3,     3,     3,
        3,     3,     3,     3,     3,     3,     3,     3,
        3,     3,     3,     3,     3,     4,     3,     4,
        4,     4,     4,     4,     4,     4,     4,     4,
        4,     4,     4,     4,     5,     4,     4,     5,
        4,     5,     5,     5,     5,     5,     5,     5,
        5,     5,     6,     5,     5,     6,     5,     6,
        6,     6,     6,     6,     6,     6,     6,     7,
        6,     7,     7,     7,     7,     7,     7,     7,
        7,     7,     8,     8,     8,     8,     8,     8,
        8,     9,     9,     9,     9,     9,     9,     9,
       10,    10,    10,    10,    10,    11,    11,    11,
       11,    11,    12,    12,    12,    12,    13,    13,
       13,    14,    14,    14,    15,    15,    15,    15,
       16,    16,    17,    17,    17,    18,    18,    18,
       19,    19,    20,    21,    21,    22,    22,    23,
       23,    24,    25,    26,    26,    27,    28,    29,
       30,    31,    32,    33,    34,    35,    36,    37,
       39,    40,    42,    43,    45,    47,    49,    51,
       53,    55,    58,    60,    63,    66,    69,    73,
       76,    80,    85,    89,    95,   100,   106,   113,
      119,   128,   136,   146,   156,   168,   182,   196,
      213,   232,   254,   279,   307,   340,   380,   425,
      480,   545,   626,   724,   847,  1003,  1205,  1471,
     1830,  2324,  3033,  4089,  5759,  8549, 13781, 24453,
    52003,     0,     0,     0,     0,     0,     0,     0,
        0,
];

/// aptX-HD LL logDelta increment per code magnitude
// TODO: entries 97..=256 are not yet checked against reference aptX-HD
// output; pin them with a loud-signal HD vector once one is available.
pub const HD_LOG_DELTA_INCREMENTS_LL: [i32; 257] = [
      0, -22, -21, -21, -20, -20, -19, -19,
    -18, -18, -17, -17, -16, -16, -15, -14,
    -14, -13, -13, -12, -12, -11, -11, -10,
    -10,  -9,  -9,  -8,  -7,  -7,  -6,  -6,
     -5,  -5,  -4,  -4,  -3,  -3,  -2,  -1,
     -1,   0,   0,   1,   1,   2,   2,   3,
      4,   4,   5,   5,   6,   6,   7,   8,
      8,   9,   9,  10,  11,  11,  12,  12,
     13,  14,  14,  15,  15,  16,  17,  17,
     18,  19,  19,  20,  21,  21,  22,  23,
     23,  24,  25,  25,  26,  27,  27,  28,
     29,  29,  30,  31,  32,  32,  33,  34,
     35,  35,  35,  36,  37,  37,  38,  39,
     40,  40,  41,  42,  42,  43,  44,  45,
     46,  47,  48,  49,  49,  50,  51,  52,
     52,  53,  54,  55,  56,  57,  58,  58,
     59,  60,  61,  62,  63,  64,  65,  66,
     67,  68,  69,  70,  71,  72,  73,  74,
     75,  76,  77,  77,  78,  79,  81,  82,
     83,  84,  85,  86,  87,  88,  89,  91,
     92,  93,  94,  95,  97,  98,  99, 101,
    102, 104, 105, 106, 108, 109, 110, 111,
    113, 114, 116, 118, 119, 121, 123, 124,
    126, 127, 129, 130, 132, 134, 136, 138,
    139, 141, 143, 145, 147, 149, 151, 154,
    156, 158, 160, 163, 165, 167, 170, 173,
    175, 178, 181, 184, 187, 189, 193, 196,
    199, 202, 205, 209, 213, 216, 221, 225,
    229, 233, 238, 243, 248, 253, 259, 265,
    272, 278, 286, 294, 303, 312, 323, 335,
    349, 365, 383, 407, 435, 468, 487, 511,
    522, 522, 522, 522, 522, 522, 522, 522,
    522,
];

/// aptX-HD LH quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const HD_THRESHOLDS_LH: [i32; 33] = [
     -21236,   21236,   63830,  106798,  150386,  194832,  240376,  287258,
     335726,  386034,  438460,  493308,  550924,  611696,  676082,  744626,
     817986,  896968,  982580, 1076118, 1179278, 1294344, 1424544, 1574560,
    1751310, 1965336, 2233074, 2580784, 3056616, 3763620, 4950596, 7406636,
    8388607,
];

/// aptX-HD LH dither scale used when reconstructing
pub const HD_INVERSE_DITHER_LH: [i32; 33] = [
     21236,  21236,  21360,  21608,  21978,  22468,  23076,  23806,
     24660,  25642,  26758,  28014,  29420,  30984,  32718,  34636,
     36756,  39096,  41684,  44546,  47720,  51246,  55180,  59586,
     64546,  70176,  76624,  84098,  92896, 103432, 116442, 133326,
    157022,
];

/// aptX-HD LH dither scale used when quantising
pub const HD_DITHER_LH: [i32; 33] = [
         0,     31,     62,     93,    123,    152,    183,    214,
       247,    283,    323,    369,    421,    483,    557,    647,
       759,    900,   1085,   1328,   1658,   2118,   2776,   3752,
      5262,   7708,  11906,  19788,  36132,  76722, 205286,      0,
         0,
];

/// aptX-HD LH logDelta increment per code magnitude
pub const HD_LOG_DELTA_INCREMENTS_LH: [i32; 33] = [
      0, -21, -16, -12,  -7,  -2,   3,   8,
     13,  19,  24,  30,  36,  43,  50,  57,
     65,  74,  83,  93, 104, 117, 131, 147,
    166, 189, 219, 259, 322, 427, 521, 521,
    521,
];

/// aptX-HD HL quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const HD_THRESHOLDS_HL: [i32; 9] = [
     -95044,   95044,  295844,  528780,  821332, 1226438, 1890540, 3344850,
    6450664,
];

/// aptX-HD HL dither scale used when reconstructing
pub const HD_INVERSE_DITHER_HL: [i32; 9] = [
      95044,   95044,  105754,  127180,  165372,  234388,  377686,  843908,
    2012908,
];

/// aptX-HD HL dither scale used when quantising
pub const HD_DITHER_HL: [i32; 9] = [
         0,   2678,   5357,   9548, -31409,  96158, 151395, 261480,
         0,
];

/// aptX-HD HL logDelta increment per code magnitude
pub const HD_LOG_DELTA_INCREMENTS_HL: [i32; 9] = [
      0, -17,   5,  30,  62, 105, 177, 334,
    518,
];

/// aptX-HD HH quantiser decision thresholds (Q23, entry 0 is the phantom negative level)
pub const HD_THRESHOLDS_HH: [i32; 17] = [
     -45754,   45754,  138496,  234896,  337336,  448310,  570738,  708380,
     866534, 1053262, 1281958, 1577006, 1980050, 2596216, 3713026, 6006770,
    8388607,
];

/// aptX-HD HH dither scale used when reconstructing
pub const HD_INVERSE_DITHER_HH: [i32; 17] = [
      45754,   45754,   46988,   49412,   53026,   57950,   64478,   73142,
      84666,  100220,  121904,  154060,  205918,  301438,  532202, 1248058,
    2505936,
];

/// aptX-HD HH dither scale used when quantising
pub const HD_DITHER_HH: [i32; 17] = [
         0,    309,    606,    904,   1231,   1632,   2172,   2956,
      4188,   6305,  10391,  19643,  44740, 144282, 349412,      0,
         0,
];

/// aptX-HD HH logDelta increment per code magnitude
pub const HD_LOG_DELTA_INCREMENTS_HH: [i32; 17] = [
      0, -18,  -8,   2,  13,  25,  38,  53,
     70,  90, 115, 147, 192, 264, 398, 521,
    521,
];
