//! Sample playlists shared by the decoder and encoder tests.

pub const MASTER: &str = r#"#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:PROGRAM-ID=0,BANDWIDTH=300000
chunklist1.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=0,BANDWIDTH=600000
chunklist2.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=0,BANDWIDTH=850000
chunklist3.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=0,BANDWIDTH=1000000
chunklist4.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=0,BANDWIDTH=1500000,CODECS="avc1.42c015,mp4a.40.2",RESOLUTION=1280x720
chunklist5.m3u8
"#;

pub const MASTER_WITH_ALTERNATIVES: &str = r#"#EXTM3U
#EXT-X-VERSION:4
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="aac",NAME="English",DEFAULT=YES,AUTOSELECT=YES,LANGUAGE="en"
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="aac",NAME="Deutsch",DEFAULT=NO,AUTOSELECT=YES,LANGUAGE="de",URI="de/playlist.m3u8"
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="aac",NAME="Commentary",DEFAULT=NO,AUTOSELECT=NO,LANGUAGE="en",URI="commentary/playlist.m3u8"
#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=1280000,CODECS="avc1.42c015,mp4a.40.2",AUDIO="aac"
low/video-only.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=2560000,CODECS="avc1.42c015,mp4a.40.2",AUDIO="aac"
mid/video-only.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=7680000,CODECS="avc1.42c015,mp4a.40.2",AUDIO="aac"
hi/video-only.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=65000,CODECS="mp4a.40.5"
main/english-audio.m3u8
"#;

pub const MASTER_ALTERNATIVES_AFTER: &str = r#"#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=1280000,AUDIO="aac"
low/video-only.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2560000,AUDIO="aac"
mid/video-only.m3u8
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="aac",NAME="English",DEFAULT=YES,LANGUAGE="en"
"#;

pub const MASTER_WITH_SUBTITLES: &str = r#"#EXTM3U
#EXT-X-VERSION:4
#EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID="subs",NAME="English",DEFAULT=YES,AUTOSELECT=YES,LANGUAGE="en",CHARACTERISTICS="public.accessibility.transcribes-spoken-dialog",URI="subs/en.m3u8"
#EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID="subs",NAME="English (forced)",DEFAULT=NO,AUTOSELECT=NO,LANGUAGE="en",FORCED=YES,URI="subs/en-forced.m3u8"
#EXT-X-MEDIA:TYPE=CLOSED-CAPTIONS,GROUP-ID="cc",NAME="English CC",DEFAULT=NO,LANGUAGE="en",INSTREAM-ID="CC1"
#EXT-X-STREAM-INF:BANDWIDTH=2000000,SUBTITLES="subs",CLOSED-CAPTIONS="cc"
with-subs.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=1000000,CLOSED-CAPTIONS=NONE
no-captions.m3u8
"#;

pub const MASTER_IFRAMES: &str = r#"#EXTM3U
#EXT-X-VERSION:7
#EXT-X-INDEPENDENT-SEGMENTS
#EXT-X-STREAM-INF:BANDWIDTH=2200000,AVERAGE-BANDWIDTH=2000000,CODECS="avc1.640028,mp4a.40.2",RESOLUTION=1280x720,FRAME-RATE=29.970,VIDEO-RANGE=SDR,HDCP-LEVEL=NONE,NAME="HD 720p"
hd/prog_index.m3u8
#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=86000,CODECS="avc1.4d001f",RESOLUTION=640x360,URI="iframe_low.m3u8"
#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=328000,CODECS="avc1.640028",RESOLUTION=1280x720,VIDEO-RANGE=SDR,URI="iframe_high.m3u8"
"#;

pub const MASTER_CUSTOM_TAGS: &str = r#"#EXTM3U
#CUSTOM-PLAYLIST-TAG:42
#EXT-X-STREAM-INF:BANDWIDTH=300000
chunklist1.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=600000
chunklist2.m3u8
"#;

pub const MEDIA_VOD: &str = r#"#EXTM3U
#EXT-X-VERSION:3
#EXT-X-PLAYLIST-TYPE:VOD
#EXT-X-TARGETDURATION:12
#EXT-X-MEDIA-SEQUENCE:1
#EXTINF:10.000,
segment1.ts
#EXTINF:11.500,Title 1
segment2.ts
#EXTINF:12,Title 2
segment3.ts
#EXTINF:9.009,Title,with,commas
segment4.ts
#EXTINF:5.005,
segment5.ts
#EXT-X-ENDLIST
"#;

pub const MEDIA_LIVE: &str = r#"#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:8
#EXT-X-MEDIA-SEQUENCE:2680
#EXTINF:7.975,
https://priv.example.com/fileSequence2680.ts
#EXTINF:7.941,
https://priv.example.com/fileSequence2681.ts
#EXTINF:7.975,
https://priv.example.com/fileSequence2682.ts
"#;

pub const MEDIA_BYTERANGE: &str = r#"#EXTM3U
#EXT-X-TARGETDURATION:11
#EXT-X-MEDIA-SEQUENCE:0
#EXTINF:10.000,
#EXT-X-BYTERANGE:75232@0
video.ts
#EXTINF:10.000,
#EXT-X-BYTERANGE:82112@752321
video.ts
#EXTINF:10.000,
#EXT-X-BYTERANGE:69864
video.ts
#EXT-X-ENDLIST
"#;

pub const MEDIA_KEYS: &str = r#"#EXTM3U
#EXT-X-TARGETDURATION:15
#EXT-X-MEDIA-SEQUENCE:7794
#EXT-X-KEY:METHOD=AES-128,URI="https://example.com/key1"
#EXTINF:2.833,
segment0.ts
#EXT-X-KEY:METHOD=AES-128,URI="https://example.com/key2",IV=0x10,KEYFORMAT="identity",KEYFORMATVERSIONS="1"
#EXTINF:15.000,
segment1.ts
#EXTINF:13.333,
segment2.ts
#EXT-X-KEY:METHOD=NONE
#EXTINF:10.000,
segment3.ts
"#;

pub const MEDIA_MAP: &str = r#"#EXTM3U
#EXT-X-TARGETDURATION:6
#EXT-X-MAP:URI="init.mp4",BYTERANGE="1000@0"
#EXTINF:6.000,
segment0.m4s
#EXT-X-MAP:URI="init2.mp4"
#EXTINF:6.000,
segment1.m4s
#EXT-X-ENDLIST
"#;

pub const MEDIA_DISCONTINUITY: &str = r#"#EXTM3U
#EXT-X-TARGETDURATION:10
#EXT-X-MEDIA-SEQUENCE:10
#EXT-X-DISCONTINUITY-SEQUENCE:2
#EXTINF:10.000,
ad0.ts
#EXT-X-DISCONTINUITY
#EXTINF:10.000,
main0.ts
#EXTINF:10.000,
main1.ts
"#;

pub const MEDIA_PROGRAM_DATE_TIME: &str = r#"#EXTM3U
#EXT-X-TARGETDURATION:10
#EXT-X-PROGRAM-DATE-TIME:2018-12-31T09:47:22+08:00
#EXTINF:10.000,
first.ts
#EXTINF:10.000,
second.ts
"#;

pub const MEDIA_START_TIME: &str = r#"#EXTM3U
#EXT-X-TARGETDURATION:10
#EXT-X-START:TIME-OFFSET=8.0,PRECISE=YES
#EXTINF:10.000,
first.ts
"#;

pub const MEDIA_SCTE35: &str = r#"#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:10
#EXT-X-MEDIA-SEQUENCE:0
#EXT-SCTE35:CUE="/DAIAAAAAAAAAAAQAAZ/I0VniQAQAgBDVUVJQAAAAH+cAAAAAA==",ID="123",TIME=123.12
#EXTINF:10.000,
media0.ts
#EXTINF:10.000,
media1.ts
#EXT-SCTE35:CUE="/DAIAAAAAAAAAAAQAAZ/I0VniQAQAgBDVUVJQAAAAH+cAAAAAA=="
#EXTINF:10.000,
media2.ts
"#;

pub const MEDIA_OATCLS: &str = r#"#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:10
#EXT-X-MEDIA-SEQUENCE:0
#EXTINF:10.000,
media0.ts
#EXT-OATCLS-SCTE35:/DAlAAAAAAAAAP/wFAUAAAABf+/+ANgNkv4AFJlwAAEBAQAA5xULLA==
#EXT-X-CUE-OUT:15
#EXTINF:8.844,
media1.ts
#EXT-X-CUE-OUT-CONT:ElapsedTime=8.844,Duration=15,SCTE35=/DAlAAAAAAAAAP/wFAUAAAABf+/+ANgNkv4AFJlwAAEBAQAA5xULLA==
#EXTINF:6.156,
media2.ts
#EXT-X-CUE-IN
#EXTINF:10.000,
media3.ts
#EXTINF:10.000,
media4.ts
"#;

pub const MEDIA_CUSTOM_TAGS: &str = r#"#EXTM3U
#CUSTOM-PLAYLIST-TAG:42
#EXT-X-TARGETDURATION:10
#CUSTOM-SEGMENT-TAG:x
#EXTINF:10.000,
first.ts
#EXTINF:10.000,
second.ts
#CUSTOM-SEGMENT-TAG:y
#CUSTOM-SEGMENT-TAG-B
#EXTINF:10.000,
third.ts
"#;

/// Live playlist with `count` ten second segments.
pub fn media_with_segments(count: usize) -> String {
    let mut playlist = String::from("#EXTM3U\n#EXT-X-TARGETDURATION:10\n");
    for i in 0..count {
        playlist.push_str(&format!("#EXTINF:10.000,\nsegment{}.ts\n", i));
    }
    playlist
}

/// Closed playlist of 70 ten second segments with `CUE-OUT`/`CUE-IN` breaks
/// given as `(first, last, duration)` segment indexes, in encoder layout.
pub fn media_with_breaks(breaks: &[(usize, usize, Option<u32>)]) -> String {
    let mut playlist = String::from(
        "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-MEDIA-SEQUENCE:0\n#EXT-X-TARGETDURATION:10\n",
    );
    for i in 0..70 {
        for (first, last, duration) in breaks {
            if *first == i {
                match duration {
                    Some(duration) => playlist.push_str(&format!("#EXT-X-CUE-OUT:{}\n", duration)),
                    None => playlist.push_str("#EXT-X-CUE-OUT\n"),
                }
            }
            if *last == i {
                playlist.push_str("#EXT-X-CUE-IN\n");
            }
        }
        playlist.push_str(&format!("#EXTINF:10.000,\nsegment{}.ts\n", i));
    }
    playlist.push_str("#EXT-X-ENDLIST\n");
    playlist
}
