use crate::models::{BoundingBox, OcrPage, OcrWord};

/// 归一化边界框到单位正方形
///
/// 所有分量 <= 2 时认为已经归一化, 原样返回。这是启发式规则,
/// 对小页面上的极小像素框会误判。
pub fn normalize_bbox(bbox: &BoundingBox, page: &OcrPage) -> BoundingBox {
    if bbox.looks_normalized() {
        return *bbox;
    }

    let (width, height) = page.dimensions();
    BoundingBox {
        left: bbox.left / width,
        top: bbox.top / height,
        width: bbox.width / width,
        height: bbox.height / height,
    }
}

/// 一组连续单词的并集框; 空输入返回 None
pub fn union_bbox(words: &[OcrWord], page: &OcrPage) -> Option<BoundingBox> {
    let mut boxes = words.iter().map(|w| normalize_bbox(&w.bounding_box, page));
    let first = boxes.next()?;

    let (mut left, mut top, mut right, mut bottom) = (first.left, first.top, first.right(), first.bottom());
    for b in boxes {
        left = left.min(b.left);
        top = top.min(b.top);
        right = right.max(b.right());
        bottom = bottom.max(b.bottom());
    }

    Some(BoundingBox {
        left,
        top,
        width: right - left,
        height: bottom - top,
    })
}

/// 输出前把每个分量限制到 [0,1], NaN 视为 0
pub fn clamp_unit(bbox: BoundingBox) -> BoundingBox {
    let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    BoundingBox {
        left: clamp(bbox.left),
        top: clamp(bbox.top),
        width: clamp(bbox.width),
        height: clamp(bbox.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> OcrPage {
        OcrPage { page_number: 1, width: 600.0, height: 800.0, words: vec![] }
    }

    fn word(text: &str, bbox: BoundingBox) -> OcrWord {
        OcrWord { text: text.to_string(), confidence: 0.9, bounding_box: bbox }
    }

    #[test]
    fn normalized_box_is_unchanged() {
        let b = BoundingBox::new(0.2, 0.25, 0.06, 0.02);
        assert_eq!(normalize_bbox(&b, &page()), b);
    }

    #[test]
    fn pixel_box_is_divided_by_page_size() {
        let b = BoundingBox::new(120.0, 400.0, 60.0, 16.0);
        let n = normalize_bbox(&b, &page());
        assert_eq!(n, BoundingBox::new(0.2, 0.5, 0.1, 0.02));
    }

    #[test]
    fn union_spans_all_words() {
        let words = vec![
            word("Office", BoundingBox::new(0.20, 0.25, 0.06, 0.02)),
            word("Visit,", BoundingBox::new(0.27, 0.24, 0.05, 0.02)),
            word("4", BoundingBox::new(0.39, 0.25, 0.02, 0.03)),
        ];
        let u = union_bbox(&words, &page()).unwrap();

        assert_eq!(u.left, 0.20);
        assert_eq!(u.top, 0.24);
        assert!((u.right() - 0.41).abs() < 1e-9);
        assert!((u.bottom() - 0.28).abs() < 1e-9);
    }

    #[test]
    fn union_mixes_pixel_and_unit_boxes() {
        let words = vec![
            word("a", BoundingBox::new(60.0, 80.0, 60.0, 16.0)),
            word("b", BoundingBox::new(0.5, 0.1, 0.1, 0.02)),
        ];
        let u = union_bbox(&words, &page()).unwrap();
        assert_eq!(u.left, 0.1);
        assert!((u.width - 0.5).abs() < 1e-9);
    }

    #[test]
    fn union_of_nothing_is_none() {
        assert!(union_bbox(&[], &page()).is_none());
    }

    #[test]
    fn clamp_keeps_components_in_unit_range() {
        let b = clamp_unit(BoundingBox::new(-0.1, 1.5, f64::NAN, 0.3));
        assert_eq!(b, BoundingBox::new(0.0, 1.0, 0.0, 0.3));
    }
}
