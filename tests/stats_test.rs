use censrs::stats;

#[test]
fn test_describe() {
    let data = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let stats = stats::describe(&data).unwrap();

    assert_eq!(stats.count, 5);
    assert_eq!(stats.mean, 30.0);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 50.0);
    assert_eq!(stats.q1, 20.0);
    assert_eq!(stats.median, 30.0);
    assert_eq!(stats.q3, 40.0);

    // 標本標準偏差: 分散 = (400+100+0+100+400)/4 = 250
    assert!((stats.std - 250.0_f64.sqrt()).abs() < 1e-10);
}

#[test]
fn test_describe_empty() {
    let data: Vec<f64> = vec![];
    assert!(stats::describe(&data).is_err());
}

#[test]
fn test_describe_single_value() {
    let stats = stats::describe(&[42.0]).unwrap();

    assert_eq!(stats.count, 1);
    assert_eq!(stats.mean, 42.0);
    assert_eq!(stats.std, 0.0);
    assert_eq!(stats.min, 42.0);
    assert_eq!(stats.median, 42.0);
    assert_eq!(stats.max, 42.0);
}

#[test]
fn test_variance() {
    let data = vec![2.0, 4.0, 6.0, 8.0];
    let var = stats::variance(&data).unwrap();

    // mean=5, 偏差平方和=20, 標本分散=20/3
    assert!((var - 20.0 / 3.0).abs() < 1e-10);

    // 1件なら分散は0
    assert_eq!(stats::variance(&[7.0]).unwrap(), 0.0);
}

#[test]
fn test_quantile_interpolation() {
    let data = vec![1.0, 2.0, 3.0, 4.0];

    assert_eq!(stats::quantile(&data, 0.0).unwrap(), 1.0);
    assert_eq!(stats::quantile(&data, 1.0).unwrap(), 4.0);

    // 線形補間: 0.5 * 3 = 1.5 → 2.0 * 0.5 + 3.0 * 0.5 = 2.5
    assert_eq!(stats::quantile(&data, 0.5).unwrap(), 2.5);
    assert_eq!(stats::median(&data).unwrap(), 2.5);

    // ソートされていない入力でも正しく計算する
    let unsorted = vec![4.0, 1.0, 3.0, 2.0];
    assert_eq!(stats::quantile(&unsorted, 0.5).unwrap(), 2.5);
}

#[test]
fn test_quantile_invalid_p() {
    let data = vec![1.0, 2.0];
    assert!(stats::quantile(&data, -0.5).is_err());
    assert!(stats::quantile(&data, 1.5).is_err());
}

#[test]
fn test_skewness_symmetric() {
    // 対称な分布の歪度はほぼゼロ
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let skew = stats::skewness(&data).unwrap();
    assert!(skew.abs() < 1e-10);
}

#[test]
fn test_skewness_right_tail() {
    // 右に裾が長い分布の歪度は正
    let data = vec![1.0, 1.0, 1.0, 2.0, 2.0, 10.0];
    let skew = stats::skewness(&data).unwrap();
    assert!(skew > 0.0);
}

#[test]
fn test_skewness_undefined() {
    // 観測数が3未満、またはばらつきゼロならNaN
    assert!(stats::skewness(&[1.0, 2.0]).unwrap().is_nan());
    assert!(stats::skewness(&[3.0, 3.0, 3.0]).unwrap().is_nan());
}

#[test]
fn test_std_dev() {
    let data = vec![2.0, 4.0, 6.0, 8.0];
    let std = stats::std_dev(&data).unwrap();
    assert!((std - (20.0_f64 / 3.0).sqrt()).abs() < 1e-10);
}
